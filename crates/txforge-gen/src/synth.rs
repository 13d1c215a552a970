//! Synthetic record generation
//!
//! Produces N transaction envelopes per table from a canonical schema. The
//! random source is injected so callers can seed it for reproducible runs;
//! the default construction draws from OS entropy.

use crate::schema::{CanonicalSchema, FieldMap, FieldType};
use chrono::Utc;
use indexmap::IndexMap;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Random string length for generic string fields
const RANDOM_STRING_LEN: usize = 8;

/// String fields that receive a short `V<n>` value instead of random text
const TAGGED_STRING_FIELDS: [&str; 3] = ["sys_creation_date", "key", "createdby"];

/// Integer field that receives a sequential 1-based value
const SEQUENTIAL_INTEGER_FIELD: &str = "customer_id";

/// Fixed operation descriptor attached to every record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationDescriptor {
    pub enum_name: String,
    pub value_name: String,
    pub value_ordinal: u32,
}

impl OperationDescriptor {
    /// The UPSERT descriptor used for all generated records
    pub fn upsert() -> Self {
        Self {
            enum_name: "Operation".to_string(),
            value_name: "UPSERT".to_string(),
            value_ordinal: 1,
        }
    }
}

/// A single generated field value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Millis(i64),
    Operation(OperationDescriptor),
}

/// One generated record: field name → value, in schema order
pub type Record = IndexMap<String, FieldValue>;

/// Transaction-shaped wrapper around one generated record
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEnvelope {
    pub start_transaction: bool,
    pub transaction_id: String,
    pub end_transaction: bool,
    pub repeated_messages: IndexMap<String, Vec<Record>>,
}

/// Synthesizes records from a canonical schema using an injected RNG
pub struct RecordSynthesizer<R: Rng> {
    rng: R,
}

impl RecordSynthesizer<StdRng> {
    /// Synthesizer seeded from OS entropy
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Synthesizer with a fixed seed, for reproducible output
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl Default for RecordSynthesizer<StdRng> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng> RecordSynthesizer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate `count` envelopes per table
    ///
    /// Each envelope wraps exactly one record. A count of zero yields an
    /// empty sequence for every table.
    pub fn synthesize(
        &mut self,
        schema: &CanonicalSchema,
        count: usize,
    ) -> IndexMap<String, Vec<TransactionEnvelope>> {
        schema
            .iter()
            .map(|(table_name, fields)| {
                let envelopes = (0..count)
                    .map(|i| self.envelope(table_name, fields, i))
                    .collect();
                (table_name.clone(), envelopes)
            })
            .collect()
    }

    fn envelope(&mut self, table_name: &str, fields: &FieldMap, index: usize) -> TransactionEnvelope {
        let record = self.record(fields, index);

        let mut repeated_messages = IndexMap::new();
        repeated_messages.insert(table_name.to_string(), vec![record]);

        TransactionEnvelope {
            start_transaction: true,
            // Collisions across envelopes are expected; this is not a
            // uniqueness guarantee.
            transaction_id: format!("transaction{}", self.rng.gen_range(1..=100)),
            end_transaction: true,
            repeated_messages,
        }
    }

    fn record(&mut self, fields: &FieldMap, index: usize) -> Record {
        fields
            .iter()
            .map(|(name, field_type)| (name.clone(), self.value(name, *field_type, index)))
            .collect()
    }

    fn value(&mut self, name: &str, field_type: FieldType, index: usize) -> FieldValue {
        match field_type {
            FieldType::String => {
                let lower = name.to_lowercase();
                if TAGGED_STRING_FIELDS.contains(&lower.as_str()) {
                    FieldValue::Text(format!("V{}", self.rng.gen_range(1..=100)))
                } else {
                    FieldValue::Text(self.random_letters(RANDOM_STRING_LEN))
                }
            },
            FieldType::Integer => {
                if name.to_lowercase() == SEQUENTIAL_INTEGER_FIELD {
                    FieldValue::Text((index + 1).to_string())
                } else {
                    FieldValue::Text(self.rng.gen_range(1..=100).to_string())
                }
            },
            FieldType::Timestamp => FieldValue::Millis(Utc::now().timestamp_millis()),
            FieldType::Operation => FieldValue::Operation(OperationDescriptor::upsert()),
        }
    }

    fn random_letters(&mut self, len: usize) -> String {
        (0..len)
            .map(|_| LETTERS[self.rng.gen_range(0..LETTERS.len())] as char)
            .collect()
    }
}
