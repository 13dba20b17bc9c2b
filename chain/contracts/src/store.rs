//! Record store — current state per voyage notice id

use arrival_types::arrival::ArrivalRecord;
use arrival_types::ids::VoyageNoticeId;
use std::collections::HashMap;

use crate::errors::RegistryError;

/// Mapping from voyage notice id to its single current record.
#[derive(Debug, Default)]
pub struct RecordStore {
    records: HashMap<VoyageNoticeId, ArrivalRecord>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or fully replace the record under `key`.
    pub fn put(&mut self, key: VoyageNoticeId, record: ArrivalRecord) {
        self.records.insert(key, record);
    }

    pub fn get(&self, key: VoyageNoticeId) -> Result<&ArrivalRecord, RegistryError> {
        self.records.get(&key).ok_or(RegistryError::NotFound {
            voyage_notice_id: key,
        })
    }

    pub fn exists(&self, key: VoyageNoticeId) -> bool {
        self.records.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&VoyageNoticeId, &ArrivalRecord)> {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrival_types::arrival::ArrivalDetails;

    fn record(id: u64, call_reference: &str, status: &str) -> ArrivalRecord {
        ArrivalRecord::from_details(
            VoyageNoticeId::new(id),
            ArrivalDetails::new(call_reference, "Casablanca", "CASA", "Test Ship", status),
            0,
        )
    }

    #[test]
    fn test_put_and_get() {
        let mut store = RecordStore::new();
        let key = VoyageNoticeId::new(1);
        store.put(key, record(1, "ESC001", "EN_ATTENTE"));
        assert!(store.exists(key));
        assert_eq!(store.get(key).unwrap().call_reference, "ESC001");
    }

    #[test]
    fn test_put_replaces() {
        let mut store = RecordStore::new();
        let key = VoyageNoticeId::new(1);
        store.put(key, record(1, "ESC001", "EN_ATTENTE"));
        store.put(key, record(1, "ESC002", "ARRIVE"));
        assert_eq!(store.len(), 1);
        let current = store.get(key).unwrap();
        assert_eq!(current.call_reference, "ESC002");
        assert_eq!(current.status.as_str(), "ARRIVE");
    }

    #[test]
    fn test_get_missing() {
        let store = RecordStore::new();
        assert_eq!(
            store.get(VoyageNoticeId::new(99999)),
            Err(RegistryError::NotFound {
                voyage_notice_id: VoyageNoticeId::new(99999)
            })
        );
        assert!(!store.exists(VoyageNoticeId::new(99999)));
        assert!(store.is_empty());
    }
}
