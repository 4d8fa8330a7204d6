//! Document store: persistence of the process collection.
//!
//! # Responsibility
//! - Keep the whole document list as one JSON array under a single key.
//! - Seed one sample document on first-ever access and persist the seed so
//!   subsequent reads are stable.
//!
//! # Invariants
//! - `save` is an upsert-by-id and always stamps `last_updated` with the
//!   current wall-clock time, ignoring the caller-supplied value.
//! - `remove` on an absent id is a silent no-op.
//! - The store performs no title validation; that is the service's job.

use crate::model::block::{Block, BlockType, ChecklistItem};
use crate::model::process::{Process, ShareSettings};
use crate::storage::{KeyValueStore, StorageError};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Key holding the JSON array of all documents.
const PROCESS_KEY: &str = "processflow_data_v1";

pub type StoreResult<T> = Result<T, StoreError>;

/// Document store error.
#[derive(Debug)]
pub enum StoreError {
    Storage(StorageError),
    /// Persisted JSON under the documents key failed to decode.
    Corrupt(serde_json::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::Corrupt(err) => write!(f, "corrupt persisted document data: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::Corrupt(err) => Some(err),
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Corrupt(value)
    }
}

/// Persistence unit for process documents over an injected key-value store.
pub struct ProcessStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> ProcessStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns all documents.
    ///
    /// On first-ever access (key absent) seeds one sample document, persists
    /// it, and returns it. The seed is written exactly once; later calls read
    /// it back unchanged.
    pub fn list(&self) -> StoreResult<Vec<Process>> {
        match self.store.read(PROCESS_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => {
                let seeded = vec![sample_process()];
                self.write_all(&seeded)?;
                info!("event=seed_documents module=repo status=ok count=1");
                Ok(seeded)
            }
        }
    }

    /// Finds one document by id.
    pub fn get(&self, id: &str) -> StoreResult<Option<Process>> {
        let documents = self.list()?;
        Ok(documents.into_iter().find(|process| process.id == id))
    }

    /// Upserts one document by id, stamping `last_updated` with now.
    pub fn save(&self, process: &Process) -> StoreResult<()> {
        let mut documents = self.list()?;
        let mut stamped = process.clone();
        stamped.last_updated = now_epoch_ms();

        match documents.iter_mut().find(|slot| slot.id == stamped.id) {
            Some(slot) => *slot = stamped,
            None => documents.push(stamped),
        }

        self.write_all(&documents)
    }

    /// Deletes one document by id. Silent no-op when absent.
    pub fn remove(&self, id: &str) -> StoreResult<()> {
        let mut documents = self.list()?;
        documents.retain(|process| process.id != id);
        self.write_all(&documents)
    }

    /// Flips the favorite flag in place. No-op on an unknown id.
    ///
    /// Unlike `save`, this does not refresh `last_updated`: favoriting is a
    /// dashboard gesture, not a content edit.
    pub fn toggle_favorite(&self, id: &str) -> StoreResult<()> {
        let mut documents = self.list()?;
        if let Some(process) = documents.iter_mut().find(|process| process.id == id) {
            process.is_favorite = !process.is_favorite;
            self.write_all(&documents)?;
        }
        Ok(())
    }

    fn write_all(&self, documents: &[Process]) -> StoreResult<()> {
        let raw = serde_json::to_string(documents)?;
        self.store.write(PROCESS_KEY, &raw)?;
        Ok(())
    }
}

pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default()
}

/// Sample onboarding document materialized on first-ever empty read.
fn sample_process() -> Process {
    Process {
        id: "sample-1".to_string(),
        title: "Onboarding de Novos Funcionários".to_string(),
        description: "Guia passo-a-passo para integração de novos membros da equipe \
                      de desenvolvimento."
            .to_string(),
        category: "RH".to_string(),
        tags: vec![
            "onboarding".to_string(),
            "rh".to_string(),
            "dev".to_string(),
        ],
        blocks: vec![
            Block {
                id: "b1".to_string(),
                kind: BlockType::Text,
                content: "Bem-vindo ao time! Este processo guia você pelas etapas \
                          essenciais do seu primeiro dia."
                    .to_string(),
                checklist_items: None,
            },
            Block {
                id: "b2".to_string(),
                kind: BlockType::Checklist,
                content: String::new(),
                checklist_items: Some(vec![
                    ChecklistItem {
                        id: "c1".to_string(),
                        text: "Configurar conta de e-mail corporativo".to_string(),
                        checked: true,
                    },
                    ChecklistItem {
                        id: "c2".to_string(),
                        text: "Acessar o Slack da empresa".to_string(),
                        checked: false,
                    },
                    ChecklistItem {
                        id: "c3".to_string(),
                        text: "Clonar repositórios do GitHub".to_string(),
                        checked: false,
                    },
                ]),
            },
            Block {
                id: "b3".to_string(),
                kind: BlockType::Image,
                content: "https://picsum.photos/800/400".to_string(),
                checklist_items: None,
            },
            Block {
                id: "b4".to_string(),
                kind: BlockType::Text,
                content: "Certifique-se de assistir ao vídeo de cultura da empresa abaixo:"
                    .to_string(),
                checklist_items: None,
            },
        ]
        .into(),
        last_updated: now_epoch_ms(),
        is_favorite: true,
        share_settings: ShareSettings::default(),
    }
}
