//! # Room Rotation
//!
//! The LG Story form's address line is pre-filled with a room number taken
//! from a fixed 180-entry rotation:
//!
//! ```text
//! index   0..=19   →  101..=120
//! index  20..=39   →  201..=220
//! ...
//! index 160..=179  →  901..=920
//! ```
//!
//! The current index is persisted so it survives restarts. Advancing is a
//! compare-and-swap on the index the caller last saw. Two operators
//! finishing a form at the same time cannot silently hand out the same
//! room twice; the loser gets [`Advance::Conflict`] with the current value.
//!
//! ## Storage format
//!
//! A JSON object with a string-encoded integer under
//! [`ROOM_INDEX_KEY`]. Other keys in the file are preserved. A missing
//! file, a missing key, or anything unparsable reads as index 0; an index
//! past the end of the rotation wraps modulo 180.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::error::OverprintError;

/// Persisted key holding the current rotation index.
pub const ROOM_INDEX_KEY: &str = "lg_story_room_index";

/// Floors in the rotation (1..=9).
pub const FLOORS: usize = 9;

/// Rooms per floor (01..=20).
pub const ROOMS_PER_FLOOR: usize = 20;

/// Length of the rotation.
pub const ROTATION_LEN: usize = FLOORS * ROOMS_PER_FLOOR;

/// Room number for a rotation index; indices wrap.
///
/// ```
/// use overprint::room::room_number;
///
/// assert_eq!(room_number(0), 101);
/// assert_eq!(room_number(19), 120);
/// assert_eq!(room_number(20), 201);
/// assert_eq!(room_number(179), 920);
/// ```
pub fn room_number(index: usize) -> u16 {
    let index = index % ROTATION_LEN;
    let floor = index / ROOMS_PER_FLOOR + 1;
    let room = index % ROOMS_PER_FLOOR + 1;
    (floor * 100 + room) as u16
}

/// Index following `index` in the rotation.
pub fn next_index(index: usize) -> usize {
    (index + 1) % ROTATION_LEN
}

/// Outcome of a compare-and-swap advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// The index moved on to `index`
    Advanced { index: usize },
    /// Someone else advanced first; `current` is what's stored now
    Conflict { current: usize },
}

impl Advance {
    /// The index in effect after the attempt.
    pub fn index(&self) -> usize {
        match self {
            Advance::Advanced { index } => *index,
            Advance::Conflict { current } => *current,
        }
    }
}

/// Shared rotation counter.
pub trait RoomCounter: Send + Sync {
    /// Current rotation index.
    fn peek(&self) -> Result<usize, OverprintError>;

    /// Move to the next index if the stored one is still `expected`.
    fn advance(&self, expected: usize) -> Result<Advance, OverprintError>;

    /// Room number at the current index.
    fn current_room(&self) -> Result<u16, OverprintError> {
        self.peek().map(room_number)
    }
}

/// In-process counter; nothing is persisted.
#[derive(Debug, Default)]
pub struct MemoryRoomStore {
    index: Mutex<usize>,
}

impl MemoryRoomStore {
    pub fn new(index: usize) -> Self {
        Self {
            index: Mutex::new(index % ROTATION_LEN),
        }
    }
}

impl RoomCounter for MemoryRoomStore {
    fn peek(&self) -> Result<usize, OverprintError> {
        self.index
            .lock()
            .map(|i| *i)
            .map_err(|_| OverprintError::Room("counter lock poisoned".into()))
    }

    fn advance(&self, expected: usize) -> Result<Advance, OverprintError> {
        let mut index = self
            .index
            .lock()
            .map_err(|_| OverprintError::Room("counter lock poisoned".into()))?;
        if *index != expected {
            return Ok(Advance::Conflict { current: *index });
        }
        *index = next_index(expected);
        Ok(Advance::Advanced { index: *index })
    }
}

/// Counter persisted in a small JSON state file.
#[derive(Debug)]
pub struct FileRoomStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileRoomStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_state(&self) -> Result<Map<String, Value>, OverprintError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(e.into()),
        };
        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => Ok(map),
            _ => {
                tracing::warn!(path = %self.path.display(), "room state unreadable, starting from 101");
                Ok(Map::new())
            }
        }
    }

    fn write_state(&self, state: &Map<String, Value>) -> Result<(), OverprintError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        std::fs::write(&tmp, serde_json::to_vec_pretty(state)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

/// Index stored in a state object, wrapped into the rotation; anything invalid is 0.
fn stored_index(state: &Map<String, Value>) -> usize {
    let parsed = match state.get(ROOM_INDEX_KEY) {
        Some(Value::String(s)) => s.trim().parse::<usize>().ok(),
        Some(Value::Number(n)) => n.as_u64().map(|n| n as usize),
        _ => None,
    };
    parsed.map(|i| i % ROTATION_LEN).unwrap_or(0)
}

impl RoomCounter for FileRoomStore {
    fn peek(&self) -> Result<usize, OverprintError> {
        Ok(stored_index(&self.read_state()?))
    }

    fn advance(&self, expected: usize) -> Result<Advance, OverprintError> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| OverprintError::Room("state file lock poisoned".into()))?;
        let mut state = self.read_state()?;
        let current = stored_index(&state);
        if current != expected {
            tracing::warn!(expected, current, "room rotation advanced elsewhere");
            return Ok(Advance::Conflict { current });
        }
        let index = next_index(current);
        state.insert(ROOM_INDEX_KEY.to_string(), Value::String(index.to_string()));
        self.write_state(&state)?;
        tracing::info!(index, room = room_number(index), "room rotation advanced");
        Ok(Advance::Advanced { index })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_state(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("overprint-room-{}-{}", std::process::id(), name));
        let _ = std::fs::remove_dir_all(&dir);
        dir.join("state.json")
    }

    #[test]
    fn test_rotation_covers_all_rooms() {
        let rooms: Vec<u16> = (0..ROTATION_LEN).map(room_number).collect();
        assert_eq!(rooms.len(), 180);
        assert_eq!(rooms[0], 101);
        assert_eq!(rooms[20], 201);
        assert_eq!(rooms[179], 920);
        for r in &rooms {
            assert!((1..=20).contains(&(r % 100)));
            assert!((1..=9).contains(&(r / 100)));
        }
    }

    #[test]
    fn test_wraps_after_920() {
        assert_eq!(next_index(179), 0);
        assert_eq!(room_number(next_index(179)), 101);
        assert_eq!(room_number(180), 101);
    }

    #[test]
    fn test_memory_cas() {
        let store = MemoryRoomStore::new(0);
        assert_eq!(store.advance(0).unwrap(), Advance::Advanced { index: 1 });
        // a stale caller loses
        assert_eq!(store.advance(0).unwrap(), Advance::Conflict { current: 1 });
        assert_eq!(store.current_room().unwrap(), 102);
    }

    #[test]
    fn test_file_store_missing_reads_zero() {
        let store = FileRoomStore::new(temp_state("missing"));
        assert_eq!(store.peek().unwrap(), 0);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let path = temp_state("reopen");
        let store = FileRoomStore::new(&path);
        store.advance(0).unwrap();
        store.advance(1).unwrap();
        drop(store);

        let reopened = FileRoomStore::new(&path);
        assert_eq!(reopened.peek().unwrap(), 2);
        assert_eq!(reopened.current_room().unwrap(), 103);

        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw[ROOM_INDEX_KEY], "2");
    }

    #[test]
    fn test_file_store_tolerates_garbage() {
        let path = temp_state("garbage");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        for contents in ["not json", "[1,2]", r#"{"lg_story_room_index":"abc"}"#, r#"{"lg_story_room_index":"-3"}"#] {
            std::fs::write(&path, contents).unwrap();
            assert_eq!(FileRoomStore::new(&path).peek().unwrap(), 0, "{}", contents);
        }
    }

    #[test]
    fn test_file_store_wraps_out_of_range_index() {
        let path = temp_state("out-of-range");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        for (contents, index, room) in [
            (r#"{"lg_story_room_index":"200"}"#, 20, 201),
            (r#"{"lg_story_room_index":"999"}"#, 99, 520),
            (r#"{"lg_story_room_index":360}"#, 0, 101),
        ] {
            std::fs::write(&path, contents).unwrap();
            let store = FileRoomStore::new(&path);
            assert_eq!(store.peek().unwrap(), index, "{}", contents);
            assert_eq!(store.current_room().unwrap(), room, "{}", contents);
        }
    }

    #[test]
    fn test_file_store_keeps_other_keys_and_wraps() {
        let path = temp_state("wrap");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"theme":"dark","lg_story_room_index":"179"}"#).unwrap();
        let store = FileRoomStore::new(&path);
        assert_eq!(store.advance(179).unwrap(), Advance::Advanced { index: 0 });
        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
        assert_eq!(raw[ROOM_INDEX_KEY], "0");
    }

    #[test]
    fn test_file_store_conflict() {
        let path = temp_state("conflict");
        let a = FileRoomStore::new(&path);
        let b = FileRoomStore::new(&path);
        assert_eq!(a.advance(0).unwrap(), Advance::Advanced { index: 1 });
        assert_eq!(b.advance(0).unwrap(), Advance::Conflict { current: 1 });
    }
}
