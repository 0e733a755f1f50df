use rust_ocpp::v1_6::types::{ConfigurationStatus, KeyValue};

/// A named server-side setting exposed through GetConfiguration and
/// ChangeConfiguration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationEntry {
    key: String,
    value: String,
    readonly: bool,
}

impl ConfigurationEntry {
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            readonly: false,
        }
    }

    #[must_use]
    pub fn readonly(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            readonly: true,
            ..Self::new(key, value)
        }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[must_use]
    pub fn is_readonly(&self) -> bool {
        self.readonly
    }

    pub(crate) fn to_key_value(&self) -> KeyValue {
        KeyValue {
            key: self.key.clone(),
            readonly: self.readonly,
            value: Some(self.value.clone()),
        }
    }
}

/// Ordered key/value table backing the configuration actions.
///
/// Keys are unique and iteration follows insertion order, which is also the
/// order GetConfiguration reports when asked for every key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigurationTable {
    entries: Vec<ConfigurationEntry>,
}

impl Default for ConfigurationTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for entry in [
            ConfigurationEntry::new("HeartbeatInterval", "60"),
            ConfigurationEntry::new("ConnectionTimeOut", "120"),
            ConfigurationEntry::readonly(
                "SupportedFeatureProfiles",
                "Core,RemoteTrigger,Configuration",
            ),
            ConfigurationEntry::readonly("ChargeProfileMaxStackLevel", "10"),
            ConfigurationEntry::new("AllowOfflineTxForUnknownId", "false"),
        ] {
            table.insert(entry);
        }
        table
    }
}

impl ConfigurationTable {
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Adds `entry`, replacing an entry with the same key in place.
    pub fn insert(&mut self, entry: ConfigurationEntry) -> Option<ConfigurationEntry> {
        match self.entries.iter_mut().find(|existing| existing.key == entry.key) {
            Some(existing) => Some(std::mem::replace(existing, entry)),
            None => {
                self.entries.push(entry);
                None
            }
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ConfigurationEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// Applies a ChangeConfiguration request. Readonly entries are left as they
    /// are.
    pub fn change(&mut self, key: &str, value: &str) -> ConfigurationStatus {
        match self.entries.iter_mut().find(|entry| entry.key == key) {
            None => ConfigurationStatus::NotSupported,
            Some(entry) if entry.readonly => ConfigurationStatus::Rejected,
            Some(entry) => {
                value.clone_into(&mut entry.value);
                ConfigurationStatus::Accepted
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigurationEntry> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(ConfigurationEntry::key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_is_seeded_in_order() {
        let table = ConfigurationTable::default();

        assert_eq!(
            table.keys().collect::<Vec<_>>(),
            [
                "HeartbeatInterval",
                "ConnectionTimeOut",
                "SupportedFeatureProfiles",
                "ChargeProfileMaxStackLevel",
                "AllowOfflineTxForUnknownId",
            ]
        );
        assert_eq!(
            table.get("SupportedFeatureProfiles"),
            Some(&ConfigurationEntry::readonly(
                "SupportedFeatureProfiles",
                "Core,RemoteTrigger,Configuration"
            ))
        );
        assert!(
            !table.get("HeartbeatInterval").expect("seeded").is_readonly(),
            "HeartbeatInterval must be writable"
        );
    }

    #[test]
    fn empty_table_has_no_entries() {
        let mut table = ConfigurationTable::empty();
        assert!(table.is_empty(), "fresh empty table");
        assert_eq!(table.len(), 0);

        table.insert(ConfigurationEntry::new("HeartbeatInterval", "60"));

        assert!(!table.is_empty(), "one entry inserted");
        assert_eq!(table.len(), 1);
        assert_eq!(ConfigurationTable::default().len(), 5);
    }

    #[test]
    fn change_updates_writable_entries() {
        let mut table = ConfigurationTable::default();

        let status = table.change("HeartbeatInterval", "30");

        assert!(matches!(status, ConfigurationStatus::Accepted), "got {status:?}");
        assert_eq!(table.get("HeartbeatInterval").map(ConfigurationEntry::value), Some("30"));
    }

    #[test]
    fn change_rejects_readonly_entries() {
        let mut table = ConfigurationTable::default();

        let status = table.change("ChargeProfileMaxStackLevel", "99");

        assert!(matches!(status, ConfigurationStatus::Rejected), "got {status:?}");
        assert_eq!(
            table.get("ChargeProfileMaxStackLevel").map(ConfigurationEntry::value),
            Some("10")
        );
    }

    #[test]
    fn change_reports_unknown_keys_as_not_supported() {
        let mut table = ConfigurationTable::default();
        let before = table.clone();

        let status = table.change("DoesNotExist", "X");

        assert!(matches!(status, ConfigurationStatus::NotSupported), "got {status:?}");
        assert_eq!(table, before);
    }

    #[test]
    fn insert_replaces_in_place() {
        let mut table = ConfigurationTable::default();

        let previous = table.insert(ConfigurationEntry::readonly("ConnectionTimeOut", "5"));
        table.insert(ConfigurationEntry::new("MeterValueSampleInterval", "0"));

        assert_eq!(previous, Some(ConfigurationEntry::new("ConnectionTimeOut", "120")));
        assert_eq!(table.len(), 6);
        assert_eq!(table.keys().nth(1), Some("ConnectionTimeOut"));
        assert_eq!(table.keys().last(), Some("MeterValueSampleInterval"));
    }

    #[test]
    fn entries_render_as_key_values() {
        let key_value = ConfigurationEntry::readonly("ChargeProfileMaxStackLevel", "10").to_key_value();

        assert_eq!(key_value.key, "ChargeProfileMaxStackLevel");
        assert!(key_value.readonly, "readonly flag must be carried over");
        assert_eq!(key_value.value.as_deref(), Some("10"));
    }
}
