//! Persistent storage abstraction
//!
//! The controller stores three things: the live offline dataset, a
//! staging copy written during self-update, and a one-byte record of the
//! last successful update day. Slots map to files or flash regions on
//! the board.

/// The fixed set of storage slots the controller uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageSlot {
    /// The live offline timetable dataset
    Timetable,
    /// Staging area for a freshly downloaded dataset
    TimetableStaging,
    /// Day-of-month of the last successful update
    UpdateRecord,
}

/// Errors reported by the storage backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// The slot holds no data
    NotFound,
    /// Read or write failed at the media level
    Io,
    /// The data does not fit the slot or the caller's buffer
    TooLarge,
}

/// Slot-addressed persistent storage
pub trait Storage {
    /// Read a slot's contents into `buf`, returning the byte count.
    fn read(&mut self, slot: StorageSlot, buf: &mut [u8]) -> Result<usize, StorageError>;

    /// Replace a slot's contents.
    fn write(&mut self, slot: StorageSlot, data: &[u8]) -> Result<(), StorageError>;

    /// Size in bytes of a slot's contents.
    fn len(&mut self, slot: StorageSlot) -> Result<usize, StorageError>;

    /// Delete a slot's contents.
    fn remove(&mut self, slot: StorageSlot) -> Result<(), StorageError>;

    /// Atomically move `from`'s contents into `to`.
    fn rename(&mut self, from: StorageSlot, to: StorageSlot) -> Result<(), StorageError>;
}
