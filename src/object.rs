use crate::table::Table;
use crate::value::Value;

/// FNV-1a, 32 bit
pub fn hash_string(chars: &str) -> u32 {
  let mut hash: u32 = 2_166_136_261;
  for byte in chars.bytes() {
    hash ^= u32::from(byte);
    hash = hash.wrapping_mul(16_777_619);
  }
  hash
}

#[derive(Debug)]
pub struct ObjString {
  chars: Box<str>,
  hash: u32,
}

impl ObjString {
  pub fn as_str(&self) -> &str {
    &self.chars
  }

  pub fn len(&self) -> usize {
    self.chars.len()
  }

  pub fn is_empty(&self) -> bool {
    self.chars.is_empty()
  }

  pub fn hash(&self) -> u32 {
    self.hash
  }
}

/// A handle to a string owned by a [`Heap`].
///
/// Strings are interned, so two handles are equal exactly when their contents
/// are equal. The hash is carried alongside the index so tables can probe
/// without going back to the heap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StringRef {
  index: usize,
  hash: u32,
}

impl StringRef {
  pub fn hash(self) -> u32 {
    self.hash
  }
}

/// Owner of every string created while compiling or running a program. All
/// strings live until the heap is dropped.
#[derive(Debug, Default)]
pub struct Heap {
  objects: Vec<ObjString>,
  strings: Table,
}

impl Heap {
  pub fn new() -> Self {
    Self::default()
  }

  /// Interns a copy of `chars`
  pub fn intern(&mut self, chars: &str) -> StringRef {
    let hash = hash_string(chars);

    match self.find_with_hash(chars, hash) {
      Some(existing) => existing,
      None => self.allocate(Box::from(chars), hash),
    }
  }

  /// Interns `chars`, reusing its buffer when the string is new
  pub fn take_string(&mut self, chars: String) -> StringRef {
    let hash = hash_string(&chars);

    match self.find_with_hash(&chars, hash) {
      Some(existing) => existing,
      None => self.allocate(chars.into_boxed_str(), hash),
    }
  }

  /// Looks up an already interned string without allocating
  pub fn find(&self, chars: &str) -> Option<StringRef> {
    self.find_with_hash(chars, hash_string(chars))
  }

  fn find_with_hash(&self, chars: &str, hash: u32) -> Option<StringRef> {
    let objects = &self.objects;
    self
      .strings
      .find_key(hash, |key| objects[key.index].as_str() == chars)
  }

  fn allocate(&mut self, chars: Box<str>, hash: u32) -> StringRef {
    let reference = StringRef {
      index: self.objects.len(),
      hash,
    };
    self.objects.push(ObjString { chars, hash });
    self.strings.set(reference, Value::Nil);

    reference
  }

  pub fn get(&self, reference: StringRef) -> &ObjString {
    &self.objects[reference.index]
  }

  pub fn as_str(&self, reference: StringRef) -> &str {
    self.get(reference).as_str()
  }

  /// Number of strings allocated
  pub fn len(&self) -> usize {
    self.objects.len()
  }

  pub fn is_empty(&self) -> bool {
    self.objects.is_empty()
  }
}
