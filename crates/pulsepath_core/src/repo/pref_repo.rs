//! Preference repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Read and write typed values under `(namespace, key)`.
//! - Report kind mismatches instead of coercing values.
//!
//! # Invariants
//! - Writes are last-writer-wins upserts.
//! - `clear` only touches the repository's own namespace.

use crate::db::migrations::current_user_version;
use crate::db::DbError;
use rusqlite::types::Value;
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Failure reading or writing preferences.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Namespace is blank after trim.
    InvalidNamespace(String),
    /// Connection has not been migrated by `open_db`.
    SchemaNotReady,
    /// Stored value exists but with a different kind than requested.
    TypeMismatch {
        key: String,
        expected: PrefKind,
        found: PrefKind,
    },
    /// Row content cannot be decoded (unknown kind, out-of-range integer).
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidNamespace(value) => write!(f, "invalid preference namespace: `{value}`"),
            Self::SchemaNotReady => write!(f, "preferences schema is not initialized"),
            Self::TypeMismatch {
                key,
                expected,
                found,
            } => write!(
                f,
                "preference `{key}` holds a {} value, expected {}",
                found.as_str(),
                expected.as_str()
            ),
            Self::InvalidData(message) => write!(f, "invalid persisted preference: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Storage kind of a preference value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefKind {
    Text,
    Int,
    Long,
    Bool,
}

impl PrefKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Int => "int",
            Self::Long => "long",
            Self::Bool => "bool",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "text" => Some(Self::Text),
            "int" => Some(Self::Int),
            "long" => Some(Self::Long),
            "bool" => Some(Self::Bool),
            _ => None,
        }
    }
}

/// One typed preference value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefValue {
    Text(String),
    Int(i32),
    Long(i64),
    Bool(bool),
}

impl PrefValue {
    pub fn kind(&self) -> PrefKind {
        match self {
            Self::Text(_) => PrefKind::Text,
            Self::Int(_) => PrefKind::Int,
            Self::Long(_) => PrefKind::Long,
            Self::Bool(_) => PrefKind::Bool,
        }
    }

    fn to_sql(&self) -> Value {
        match self {
            Self::Text(value) => Value::Text(value.clone()),
            Self::Int(value) => Value::Integer(i64::from(*value)),
            Self::Long(value) => Value::Integer(*value),
            Self::Bool(value) => Value::Integer(i64::from(*value)),
        }
    }
}

/// Key-value contract behind the Local Store.
///
/// Typed accessors return `Ok(None)` for a missing key and
/// `RepoError::TypeMismatch` for a key stored with another kind.
pub trait PreferenceRepository {
    /// Namespace this repository reads and writes.
    fn namespace(&self) -> &str;
    fn get(&self, key: &str) -> RepoResult<Option<PrefValue>>;
    fn put(&self, key: &str, value: PrefValue) -> RepoResult<()>;
    /// Writes all entries or none of them.
    fn put_all(&self, entries: Vec<(&str, PrefValue)>) -> RepoResult<()>;
    /// Returns whether a value was present.
    fn remove(&self, key: &str) -> RepoResult<bool>;
    /// Keys in this namespace, sorted.
    fn keys(&self) -> RepoResult<Vec<String>>;
    /// Deletes every key in this namespace and returns how many were removed.
    fn clear(&self) -> RepoResult<usize>;

    fn get_text(&self, key: &str) -> RepoResult<Option<String>> {
        match self.get(key)? {
            None => Ok(None),
            Some(PrefValue::Text(value)) => Ok(Some(value)),
            Some(other) => Err(mismatch(key, PrefKind::Text, &other)),
        }
    }

    fn get_int(&self, key: &str) -> RepoResult<Option<i32>> {
        match self.get(key)? {
            None => Ok(None),
            Some(PrefValue::Int(value)) => Ok(Some(value)),
            Some(other) => Err(mismatch(key, PrefKind::Int, &other)),
        }
    }

    fn get_long(&self, key: &str) -> RepoResult<Option<i64>> {
        match self.get(key)? {
            None => Ok(None),
            Some(PrefValue::Long(value)) => Ok(Some(value)),
            Some(other) => Err(mismatch(key, PrefKind::Long, &other)),
        }
    }

    fn get_bool(&self, key: &str) -> RepoResult<Option<bool>> {
        match self.get(key)? {
            None => Ok(None),
            Some(PrefValue::Bool(value)) => Ok(Some(value)),
            Some(other) => Err(mismatch(key, PrefKind::Bool, &other)),
        }
    }
}

fn mismatch(key: &str, expected: PrefKind, found: &PrefValue) -> RepoError {
    RepoError::TypeMismatch {
        key: key.to_string(),
        expected,
        found: found.kind(),
    }
}

/// SQLite-backed preferences for one namespace.
#[derive(Debug)]
pub struct SqlitePreferenceRepository<'conn> {
    conn: &'conn Connection,
    namespace: String,
}

impl<'conn> SqlitePreferenceRepository<'conn> {
    /// Binds `namespace` on a connection returned by `open_db*`.
    pub fn try_new(conn: &'conn Connection, namespace: &str) -> RepoResult<Self> {
        let namespace = namespace.trim();
        if namespace.is_empty() {
            return Err(RepoError::InvalidNamespace(namespace.to_string()));
        }
        if current_user_version(conn)? == 0 {
            return Err(RepoError::SchemaNotReady);
        }

        Ok(Self {
            conn,
            namespace: namespace.to_string(),
        })
    }
}

impl PreferenceRepository for SqlitePreferenceRepository<'_> {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    fn get(&self, key: &str) -> RepoResult<Option<PrefValue>> {
        let row = self
            .conn
            .query_row(
                "SELECT value_kind, value
                 FROM preferences
                 WHERE namespace = ?1 AND key = ?2;",
                params![self.namespace, key],
                |row| {
                    let kind: String = row.get(0)?;
                    let value: Value = row.get(1)?;
                    Ok((kind, value))
                },
            )
            .optional()?;

        row.map(|(kind, value)| decode_value(key, &kind, value))
            .transpose()
    }

    fn put(&self, key: &str, value: PrefValue) -> RepoResult<()> {
        upsert(self.conn, &self.namespace, key, &value)
    }

    fn put_all(&self, entries: Vec<(&str, PrefValue)>) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;
        for (key, value) in &entries {
            upsert(&tx, &self.namespace, key, value)?;
        }
        tx.commit()?;
        Ok(())
    }

    fn remove(&self, key: &str) -> RepoResult<bool> {
        let removed = self.conn.execute(
            "DELETE FROM preferences WHERE namespace = ?1 AND key = ?2;",
            params![self.namespace, key],
        )?;
        Ok(removed > 0)
    }

    fn keys(&self) -> RepoResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT key FROM preferences WHERE namespace = ?1 ORDER BY key ASC;")?;
        let keys = stmt
            .query_map([self.namespace.as_str()], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }

    fn clear(&self) -> RepoResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM preferences WHERE namespace = ?1;",
            [self.namespace.as_str()],
        )?;
        Ok(removed)
    }
}

fn upsert(conn: &Connection, namespace: &str, key: &str, value: &PrefValue) -> RepoResult<()> {
    conn.execute(
        "INSERT INTO preferences (namespace, key, value_kind, value, updated_at)
         VALUES (?1, ?2, ?3, ?4, strftime('%s', 'now') * 1000)
         ON CONFLICT (namespace, key) DO UPDATE SET
            value_kind = excluded.value_kind,
            value = excluded.value,
            updated_at = excluded.updated_at;",
        params![namespace, key, value.kind().as_str(), value.to_sql()],
    )?;
    Ok(())
}

fn decode_value(key: &str, kind_text: &str, value: Value) -> RepoResult<PrefValue> {
    let kind = PrefKind::parse(kind_text).ok_or_else(|| {
        RepoError::InvalidData(format!("unknown value kind `{kind_text}` for `{key}`"))
    })?;

    match (kind, value) {
        (PrefKind::Text, Value::Text(text)) => Ok(PrefValue::Text(text)),
        (PrefKind::Int, Value::Integer(raw)) => i32::try_from(raw)
            .map(PrefValue::Int)
            .map_err(|_| {
                RepoError::InvalidData(format!("int value {raw} out of range for `{key}`"))
            }),
        (PrefKind::Long, Value::Integer(raw)) => Ok(PrefValue::Long(raw)),
        (PrefKind::Bool, Value::Integer(0)) => Ok(PrefValue::Bool(false)),
        (PrefKind::Bool, Value::Integer(1)) => Ok(PrefValue::Bool(true)),
        (kind, other) => Err(RepoError::InvalidData(format!(
            "`{key}` declared as {} but stored as {:?}",
            kind.as_str(),
            other.data_type()
        ))),
    }
}

