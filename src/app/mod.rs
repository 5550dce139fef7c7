//! The form/edit controller.
//!
//! A small state machine over two modes: Create (no id staged) and Edit
//! (an id staged, draft pre-filled). Every mutation is a full
//! read-modify-write cycle against the storage adapter, followed by a
//! rebuild of the display tree - the store, the staged state and the
//! rendered view never drift apart.

mod form;
mod render;

pub use form::ProjectDraft;
pub use render::{
    EMPTY_MESSAGE, ItemView, ListView, Node, build_view, render_cleared, render_deleted,
    render_detail, render_list, render_not_found, render_saved, render_totals,
};

use crate::Result;
use crate::core::{Collection, Project, ProjectId, SortKey};
use crate::image::{EncodeLimits, encode_file};
use crate::store::{KvStore, Storage};

/// Controller mode: creating a fresh record, or editing a staged one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Create,
    Edit(ProjectId),
}

/// Every user-initiated action, decoupled from any UI event vocabulary.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// Submit the form in the current mode.
    Submit(ProjectDraft),
    /// Stage a record for editing.
    EditPreload(ProjectId),
    /// Remove a record.
    Delete(ProjectId),
    /// Back to Create mode; persisted data untouched.
    Reset,
    /// Change the display ordering.
    SortChange(Option<SortKey>),
    /// Wipe the whole collection.
    ClearAll,
    /// Append a handful of sample projects.
    Seed,
}

/// What a dispatched action did. Absent ids surface here as `NotFound`,
/// never as errors.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Saved { project: Project, created: bool },
    Editing { draft: ProjectDraft },
    Deleted(ProjectId),
    NotFound(ProjectId),
    Reset,
    Sorted,
    Cleared(usize),
    Seeded(usize),
}

pub struct App<S: KvStore> {
    storage: Storage<S>,
    mode: Mode,
    sort: Option<SortKey>,
    limits: EncodeLimits,
    view: ListView,
}

impl<S: KvStore> App<S> {
    /// Load the collection and render the initial view.
    pub fn new(storage: Storage<S>, sort: Option<SortKey>, limits: EncodeLimits) -> Self {
        let view = build_view(&storage.load_collection(), sort);
        Self {
            storage,
            mode: Mode::Create,
            sort,
            limits,
            view,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn sort(&self) -> Option<SortKey> {
        self.sort
    }

    /// The display tree as of the last mutation or load.
    pub fn view(&self) -> &ListView {
        &self.view
    }

    /// Read one record straight from the store.
    pub fn get(&self, id: &ProjectId) -> Option<Project> {
        self.storage.load_collection().find_by_id(id).cloned()
    }

    pub fn dispatch(&mut self, action: Action) -> Result<Outcome> {
        match action {
            Action::Submit(draft) => self.submit(draft),
            Action::EditPreload(id) => Ok(self.edit_preload(id)),
            Action::Delete(id) => self.delete(id),
            Action::Reset => {
                self.mode = Mode::Create;
                Ok(Outcome::Reset)
            }
            Action::SortChange(key) => {
                self.sort = key;
                let collection = self.storage.load_collection();
                self.refresh(&collection);
                Ok(Outcome::Sorted)
            }
            Action::ClearAll => self.clear_all(),
            Action::Seed => self.seed(),
        }
    }

    fn submit(&mut self, draft: ProjectDraft) -> Result<Outcome> {
        let id = match &self.mode {
            Mode::Edit(id) => id.clone(),
            Mode::Create => ProjectId::generate(),
        };
        let collection = self.storage.load_collection();

        // Encode before any mutation: a failure here must leave the mode,
        // the staged id and the stored data exactly as they were.
        let image_data = match &draft.image_path {
            Some(path) => Some(encode_file(path, self.limits)?),
            None => collection
                .find_by_id(&id)
                .and_then(|prior| prior.image_data.clone()),
        };

        let project = draft.build(id, image_data);
        let created = collection.find_by_id(&project.id).is_none();
        let next = collection.upsert(project.clone());
        self.storage.save_collection(&next)?;

        tracing::debug!(id = %project.id, created, "submitted project");
        self.mode = Mode::Create;
        self.refresh(&next);
        Ok(Outcome::Saved { project, created })
    }

    fn edit_preload(&mut self, id: ProjectId) -> Outcome {
        let collection = self.storage.load_collection();
        match collection.find_by_id(&id) {
            Some(project) => {
                let draft = ProjectDraft::from_project(project);
                self.mode = Mode::Edit(id);
                Outcome::Editing { draft }
            }
            None => Outcome::NotFound(id),
        }
    }

    fn delete(&mut self, id: ProjectId) -> Result<Outcome> {
        let collection = self.storage.load_collection();
        if collection.find_by_id(&id).is_none() {
            return Ok(Outcome::NotFound(id));
        }
        let next = collection.delete_by_id(&id);
        self.storage.save_collection(&next)?;

        // Deleting the record staged for editing falls back to Create.
        if self.mode == Mode::Edit(id.clone()) {
            self.mode = Mode::Create;
        }
        self.refresh(&next);
        Ok(Outcome::Deleted(id))
    }

    fn clear_all(&mut self) -> Result<Outcome> {
        let count = self.storage.load_collection().len();
        let empty = Collection::new();
        self.storage.save_collection(&empty)?;
        self.mode = Mode::Create;
        self.refresh(&empty);
        Ok(Outcome::Cleared(count))
    }

    fn seed(&mut self) -> Result<Outcome> {
        let mut collection = self.storage.load_collection();
        let samples = sample_projects();
        let count = samples.len();
        for sample in samples {
            collection = collection.upsert(sample);
        }
        self.storage.save_collection(&collection)?;
        self.refresh(&collection);
        Ok(Outcome::Seeded(count))
    }

    fn refresh(&mut self, collection: &Collection) {
        self.view = build_view(collection, self.sort);
    }
}

fn sample_projects() -> Vec<Project> {
    let mut aloy = Project::new("Aloy");
    aloy.series = Some("Horizon Zero Dawn".into());
    aloy.category = Some("armor".into());
    aloy.status = Some("in-progress".into());
    aloy.hours = 42.0;
    aloy.cost = 310.0;
    aloy.materials = Some("EVA foam, worbla, leather straps".into());

    let mut nier = Project::new("2B");
    nier.series = Some("NieR: Automata".into());
    nier.category = Some("sewing".into());
    nier.status = Some("planning".into());
    nier.cost = 120.0;

    let mut link = Project::new("Link");
    link.series = Some("Tears of the Kingdom".into());
    link.category = Some("props".into());
    link.status = Some("done".into());
    link.hours = 18.5;
    link.cost = 75.0;
    link.favorite = true;

    vec![aloy, nier, link]
}
