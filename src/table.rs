use crate::object::StringRef;
use crate::value::Value;
use std::mem;

const TABLE_MAX_LOAD: f64 = 0.75;

#[derive(Debug, Clone, Copy)]
enum Entry {
  Empty,
  Tombstone,
  Occupied { key: StringRef, value: Value },
}

/// Open addressing hash table with linear probing, keyed by interned strings.
///
/// Deleted entries leave a tombstone behind so probe sequences are not cut
/// short. `count` includes tombstones, which keeps the load factor honest and
/// guarantees every probe eventually reaches an empty slot.
#[derive(Debug, Default)]
pub struct Table {
  count: usize,
  entries: Vec<Entry>,
}

fn grow_capacity(capacity: usize) -> usize {
  if capacity < 8 {
    8
  } else {
    capacity * 2
  }
}

/// Slot holding `key`, or the slot it should be inserted into: the first
/// tombstone passed over, otherwise the empty slot that ended the probe.
fn find_entry(entries: &[Entry], key: StringRef) -> usize {
  let capacity = entries.len();
  let mut index = key.hash() as usize % capacity;
  let mut tombstone = None;

  loop {
    match entries[index] {
      Entry::Empty => return tombstone.unwrap_or(index),
      Entry::Tombstone => {
        if tombstone.is_none() {
          tombstone = Some(index);
        }
      }
      Entry::Occupied { key: existing, .. } if existing == key => return index,
      Entry::Occupied { .. } => {}
    }

    index = (index + 1) % capacity;
  }
}

impl Table {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn capacity(&self) -> usize {
    self.entries.len()
  }

  /// Number of live entries
  pub fn len(&self) -> usize {
    self.iter().count()
  }

  pub fn is_empty(&self) -> bool {
    self.len() == 0
  }

  pub fn get(&self, key: StringRef) -> Option<Value> {
    if self.count == 0 {
      return None;
    }

    match self.entries[find_entry(&self.entries, key)] {
      Entry::Occupied { value, .. } => Some(value),
      _ => None,
    }
  }

  /// Inserts or overwrites `key`, returning whether the key was new
  pub fn set(&mut self, key: StringRef, value: Value) -> bool {
    if (self.count + 1) as f64 > self.capacity() as f64 * TABLE_MAX_LOAD {
      self.adjust_capacity(grow_capacity(self.capacity()));
    }

    let index = find_entry(&self.entries, key);
    let entry = &mut self.entries[index];

    let is_new_key = !matches!(entry, Entry::Occupied { .. });
    if matches!(entry, Entry::Empty) {
      self.count += 1;
    }

    *entry = Entry::Occupied { key, value };
    is_new_key
  }

  pub fn delete(&mut self, key: StringRef) -> bool {
    if self.count == 0 {
      return false;
    }

    let index = find_entry(&self.entries, key);
    match self.entries[index] {
      Entry::Occupied { .. } => {
        self.entries[index] = Entry::Tombstone;
        true
      }
      _ => false,
    }
  }

  pub fn add_all(&self, to: &mut Table) {
    for (key, value) in self.iter() {
      to.set(key, value);
    }
  }

  /// Finds a key by hash and a caller supplied comparison. This is how the
  /// interning set compares string contents rather than identity.
  pub fn find_key(&self, hash: u32, matches: impl Fn(StringRef) -> bool) -> Option<StringRef> {
    if self.count == 0 {
      return None;
    }

    let capacity = self.capacity();
    let mut index = hash as usize % capacity;

    loop {
      match self.entries[index] {
        Entry::Empty => return None,
        Entry::Occupied { key, .. } if key.hash() == hash && matches(key) => return Some(key),
        Entry::Occupied { .. } | Entry::Tombstone => {}
      }

      index = (index + 1) % capacity;
    }
  }

  pub fn iter(&self) -> impl Iterator<Item = (StringRef, Value)> + '_ {
    self.entries.iter().filter_map(|entry| match entry {
      Entry::Occupied { key, value } => Some((*key, *value)),
      _ => None,
    })
  }

  fn adjust_capacity(&mut self, capacity: usize) {
    // Take the old entries before resizing, so every live entry is carried over
    let old_entries = mem::replace(&mut self.entries, vec![Entry::Empty; capacity]);

    self.count = 0;
    for entry in old_entries {
      if let Entry::Occupied { key, value } = entry {
        let index = find_entry(&self.entries, key);
        self.entries[index] = Entry::Occupied { key, value };
        self.count += 1;
      }
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::object::Heap;

  fn keys(heap: &mut Heap, count: usize) -> Vec<StringRef> {
    (0..count)
      .map(|i| heap.intern(&format!("key{i}")))
      .collect()
  }

  #[test]
  fn set_then_get() {
    let mut heap = Heap::new();
    let mut table = Table::new();
    let key = heap.intern("answer");

    assert_eq!(table.get(key), None);
    assert!(table.set(key, Value::from(42.0)));
    assert_eq!(table.get(key), Some(Value::from(42.0)));

    assert!(!table.set(key, Value::from(true)));
    assert_eq!(table.get(key), Some(Value::from(true)));
    assert_eq!(table.len(), 1);
  }

  #[test]
  fn delete_then_get() {
    let mut heap = Heap::new();
    let mut table = Table::new();
    let key = heap.intern("gone");

    assert!(!table.delete(key));
    table.set(key, Value::Nil);
    assert!(table.delete(key));
    assert_eq!(table.get(key), None);
    assert!(!table.delete(key));
    assert!(table.is_empty());
  }

  #[test]
  fn set_after_delete() {
    let mut heap = Heap::new();
    let mut table = Table::new();
    let key = heap.intern("back");

    table.set(key, Value::from(1.0));
    table.delete(key);
    assert!(table.set(key, Value::from(2.0)));
    assert_eq!(table.get(key), Some(Value::from(2.0)));
  }

  #[test]
  fn probes_past_tombstones() {
    let mut heap = Heap::new();
    let mut table = Table::new();
    let keys = keys(&mut heap, 6);

    for (i, key) in keys.iter().enumerate() {
      table.set(*key, Value::from(i as f64));
    }
    for key in &keys[..3] {
      table.delete(*key);
    }

    for (i, key) in keys.iter().enumerate().skip(3) {
      assert_eq!(table.get(*key), Some(Value::from(i as f64)));
    }
    for key in &keys[..3] {
      assert_eq!(table.get(*key), None);
    }
  }

  #[test]
  fn growth_keeps_live_entries() {
    let mut heap = Heap::new();
    let mut table = Table::new();
    let keys = keys(&mut heap, 200);

    for (i, key) in keys.iter().enumerate() {
      table.set(*key, Value::from(i as f64));
    }

    assert!(table.capacity() >= 256);
    assert_eq!(table.len(), 200);
    for (i, key) in keys.iter().enumerate() {
      assert_eq!(table.get(*key), Some(Value::from(i as f64)));
    }
  }

  #[test]
  fn tombstones_force_a_resize() {
    let mut heap = Heap::new();
    let mut table = Table::new();
    let keys = keys(&mut heap, 100);

    // Tombstones count toward the load, so a resize clears them out before
    // the table fills up with dead slots
    for key in &keys {
      table.set(*key, Value::Nil);
      table.delete(*key);
    }

    let tombstones = table
      .entries
      .iter()
      .filter(|entry| matches!(entry, Entry::Tombstone))
      .count();

    assert!(table.is_empty());
    // Only tombstones made since the last resize are left
    assert_eq!(table.count, tombstones);
    assert!(table.count < keys.len());
    assert!(table.capacity() <= 64);
    for key in &keys {
      assert_eq!(table.get(*key), None);
    }
  }

  #[test]
  fn resize_drops_tombstones() {
    let mut heap = Heap::new();
    let mut table = Table::new();
    let keys = keys(&mut heap, 5);

    for key in &keys {
      table.set(*key, Value::Nil);
    }
    for key in &keys[..3] {
      table.delete(*key);
    }
    assert_eq!(table.count, 5);

    table.adjust_capacity(16);
    assert_eq!(table.count, 2);
    assert_eq!(table.capacity(), 16);
    assert!(table
      .entries
      .iter()
      .all(|entry| !matches!(entry, Entry::Tombstone)));
    assert_eq!(table.get(keys[4]), Some(Value::Nil));
  }

  #[test]
  fn add_all_copies_entries() {
    let mut heap = Heap::new();
    let mut from = Table::new();
    let mut to = Table::new();
    let keys = keys(&mut heap, 10);

    for (i, key) in keys.iter().enumerate() {
      from.set(*key, Value::from(i as f64));
    }
    from.delete(keys[0]);
    from.add_all(&mut to);

    assert_eq!(to.len(), 9);
    assert_eq!(to.get(keys[0]), None);
    assert_eq!(to.get(keys[9]), Some(Value::from(9.0)));
  }

  #[test]
  fn find_key_compares_with_callback() {
    let mut heap = Heap::new();
    let mut table = Table::new();
    let key = heap.intern("needle");
    table.set(key, Value::Nil);

    assert_eq!(table.find_key(key.hash(), |_| true), Some(key));
    assert_eq!(table.find_key(key.hash(), |_| false), None);
  }
}
