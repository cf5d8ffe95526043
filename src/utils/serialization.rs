// Bincode 2.x helpers shared by the record store
use crate::error::{Result, VaultError};
use serde::{Deserialize, Serialize};

/// Serialize data using bincode 2.0 with standard configuration
pub fn serialize<T: Serialize + bincode::Encode>(data: &T) -> Result<Vec<u8>> {
    let config = bincode::config::standard();
    bincode::encode_to_vec(data, config)
        .map_err(|e| VaultError::Serialization(format!("Serialization failed: {e}")))
}

/// Deserialize data using bincode 2.0 with standard configuration
pub fn deserialize<T>(bytes: &[u8]) -> Result<T>
where
    T: for<'de> Deserialize<'de> + bincode::Decode<()>,
{
    let config = bincode::config::standard();
    let (data, _) = bincode::decode_from_slice(bytes, config)
        .map_err(|e| VaultError::Serialization(format!("Deserialization failed: {e}")))?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, bincode::Encode, bincode::Decode)]
    struct SampleRecord {
        owner: String,
        blob: Vec<u8>,
        stored_at: u64,
    }

    #[test]
    fn test_record_survives_encoding() {
        let original = SampleRecord {
            owner: "0x00000000000000000000000000000000000000aa".to_string(),
            blob: vec![7u8; 60],
            stored_at: 1_700_000_000,
        };

        let bytes = serialize(&original).expect("Serialization should work");
        let decoded: SampleRecord = deserialize(&bytes).expect("Deserialization should work");

        assert_eq!(original, decoded);
    }

    #[test]
    fn test_deserialize_truncated_data() {
        let result: Result<SampleRecord> = deserialize(&[0x05, 0x30]);
        assert!(matches!(result, Err(VaultError::Serialization(_))));
    }
}
