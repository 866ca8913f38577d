//! SQLite-backed product table.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::catalog::{validate_product, Product, ProductDraft};
use crate::config::DatabaseConfig;
use crate::store::{samples, StoreError};

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS products (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL,
        category TEXT NOT NULL,
        description TEXT NOT NULL,
        detailedDescription TEXT,
        code TEXT,
        image TEXT NOT NULL,
        specs TEXT,
        features TEXT,
        price TEXT,
        downloadUrl TEXT,
        createdAt DATETIME DEFAULT CURRENT_TIMESTAMP,
        updatedAt DATETIME DEFAULT CURRENT_TIMESTAMP
    )";

const SELECT_COLUMNS: &str = "SELECT id, name, category, description, detailedDescription, code, \
     image, specs, features, price, downloadUrl, createdAt, updatedAt FROM products";

const INSERT: &str = "INSERT INTO products \
     (name, category, description, detailedDescription, code, image, specs, features, price, downloadUrl) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";

const UPDATE: &str = "UPDATE products SET \
     name = ?1, category = ?2, description = ?3, detailedDescription = ?4, code = ?5, \
     image = ?6, specs = ?7, features = ?8, price = ?9, downloadUrl = ?10, \
     updatedAt = CURRENT_TIMESTAMP \
     WHERE id = ?11";

/// Product table behind a single connection.
///
/// The connection mutex is the process-wide write lock: every write runs in
/// one transaction while holding it, and reads take it too so they never
/// observe a half-applied save.
pub struct ProductStore {
    conn: Mutex<Connection>,
}

impl ProductStore {
    /// Open (creating if needed) the database file described by `config`.
    pub fn open(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let path = Path::new(&config.path);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_millis(config.busy_timeout_ms))?;
        Self::init(conn, config.seed_samples)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory(seed_samples: bool) -> Result<Self, StoreError> {
        Self::init(Connection::open_in_memory()?, seed_samples)
    }

    fn init(conn: Connection, seed_samples: bool) -> Result<Self, StoreError> {
        conn.execute_batch(SCHEMA)?;
        migrate(&conn)?;

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?;
        if count == 0 && seed_samples {
            let inserted = seed(&conn)?;
            tracing::info!(inserted, "Seeded empty product table with sample catalog");
        }

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// All products, ascending by id.
    pub fn list(&self) -> Result<Vec<Product>, StoreError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY id"))?;
        let rows = stmt
            .query_map([], ProductRow::from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        rows.into_iter().map(ProductRow::into_product).collect()
    }

    /// A single product by id.
    pub fn get(&self, id: i64) -> Result<Option<Product>, StoreError> {
        let conn = self.lock()?;
        fetch(&conn, id)
    }

    /// Number of stored products.
    pub fn count(&self) -> Result<usize, StoreError> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Insert a draft without an id, or overwrite every mutable field of the
    /// row it names. Returns the row as persisted.
    pub fn save(&self, draft: &ProductDraft) -> Result<Product, StoreError> {
        let specs = serde_json::to_string(&draft.specs)?;
        let features = serde_json::to_string(&draft.features)?;

        let mut conn = self.lock()?;
        let tx = conn.transaction()?;

        let id = match draft.id {
            Some(id) => {
                let changed = tx.execute(
                    UPDATE,
                    params![
                        draft.name,
                        draft.category,
                        draft.description,
                        nullable(&draft.detailed_description),
                        nullable(&draft.code),
                        draft.image,
                        specs,
                        features,
                        nullable(&draft.price),
                        nullable(&draft.download_url),
                        id,
                    ],
                )?;
                if changed == 0 {
                    return Err(StoreError::NotFound(id));
                }
                id
            }
            None => {
                insert(&tx, draft, &specs, &features)?;
                tx.last_insert_rowid()
            }
        };

        let product = fetch(&tx, id)?.ok_or(StoreError::NotFound(id))?;
        tx.commit()?;
        Ok(product)
    }

    /// Delete by id. Non-positive ids are refused without touching the database.
    pub fn delete(&self, id: i64) -> Result<bool, StoreError> {
        if id <= 0 {
            return Ok(false);
        }
        let conn = self.lock()?;
        let removed = conn.execute("DELETE FROM products WHERE id = ?1", params![id])?;
        Ok(removed > 0)
    }
}

/// Older databases predate the download link column.
fn migrate(conn: &Connection) -> Result<(), StoreError> {
    let columns = {
        let mut stmt = conn.prepare("PRAGMA table_info(products)")?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<Result<Vec<_>, _>>()?;
        names
    };
    if !columns.iter().any(|c| c == "downloadUrl") {
        conn.execute_batch("ALTER TABLE products ADD COLUMN downloadUrl TEXT")?;
        tracing::info!("Added downloadUrl column to products table");
    }
    Ok(())
}

fn seed(conn: &Connection) -> Result<usize, StoreError> {
    let mut inserted = 0;
    for raw in samples::sample_products() {
        let Some(draft) = validate_product(&raw) else {
            tracing::warn!(sample = %raw["name"], "Skipping invalid sample product");
            continue;
        };
        let specs = serde_json::to_string(&draft.specs)?;
        let features = serde_json::to_string(&draft.features)?;
        insert(conn, &draft, &specs, &features)?;
        inserted += 1;
    }
    Ok(inserted)
}

fn insert(conn: &Connection, draft: &ProductDraft, specs: &str, features: &str) -> Result<(), StoreError> {
    conn.execute(
        INSERT,
        params![
            draft.name,
            draft.category,
            draft.description,
            nullable(&draft.detailed_description),
            nullable(&draft.code),
            draft.image,
            specs,
            features,
            nullable(&draft.price),
            nullable(&draft.download_url),
        ],
    )?;
    Ok(())
}

fn fetch(conn: &Connection, id: i64) -> Result<Option<Product>, StoreError> {
    conn.query_row(&format!("{SELECT_COLUMNS} WHERE id = ?1"), params![id], ProductRow::from_row)
        .optional()?
        .map(ProductRow::into_product)
        .transpose()
}

fn nullable(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Raw column values; list columns are still encoded.
struct ProductRow {
    id: i64,
    name: String,
    category: String,
    description: String,
    detailed_description: Option<String>,
    code: Option<String>,
    image: Option<String>,
    specs: Option<String>,
    features: Option<String>,
    price: Option<String>,
    download_url: Option<String>,
    created_at: Option<String>,
    updated_at: Option<String>,
}

impl ProductRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            category: row.get(2)?,
            description: row.get(3)?,
            detailed_description: row.get(4)?,
            code: row.get(5)?,
            image: row.get(6)?,
            specs: row.get(7)?,
            features: row.get(8)?,
            price: row.get(9)?,
            download_url: row.get(10)?,
            created_at: row.get(11)?,
            updated_at: row.get(12)?,
        })
    }

    fn into_product(self) -> Result<Product, StoreError> {
        Ok(Product {
            id: self.id,
            name: self.name,
            category: self.category,
            description: self.description,
            detailed_description: self.detailed_description.unwrap_or_default(),
            code: self.code.unwrap_or_default(),
            image: self.image.unwrap_or_default(),
            specs: decode_list(self.specs.as_deref())?,
            features: decode_list(self.features.as_deref())?,
            price: self.price.unwrap_or_default(),
            download_url: self.download_url.unwrap_or_default(),
            created_at: self.created_at.unwrap_or_default(),
            updated_at: self.updated_at.unwrap_or_default(),
        })
    }
}

/// Absent or empty encodings are an empty list.
fn decode_list(encoded: Option<&str>) -> Result<Vec<String>, StoreError> {
    match encoded.map(str::trim) {
        None | Some("") => Ok(Vec::new()),
        Some(text) => Ok(serde_json::from_str(text)?),
    }
}
