use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

use crate::{BitMatrix, BitVec};

// Both types use plain nested 0/1 arrays. A matrix without rows serializes
// as `[]` and reads back as the 0×0 matrix.

impl Serialize for BitVec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter().map(u8::from))
    }
}

impl<'de> Deserialize<'de> for BitVec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let values = Vec::<u8>::deserialize(deserializer)?;
        values
            .into_iter()
            .map(|value| match value {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(de::Error::custom(format!("bit value {value} is not 0 or 1"))),
            })
            .collect()
    }
}

impl Serialize for BitMatrix {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_rows().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BitMatrix {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let rows = Vec::<Vec<u8>>::deserialize(deserializer)?;
        BitMatrix::try_from_rows(&rows).map_err(de::Error::custom)
    }
}
