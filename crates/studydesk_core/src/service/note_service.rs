//! Study note use-cases.
//!
//! # Invariants
//! - Title and content are required on create and after every edit.
//! - New notes are not favourites.

use super::collection::RecordCollection;
use super::ServiceResult;
use crate::model::note::{Note, NoteDraft, NotePatch};
use crate::repo::kv_repo::KvStore;
use crate::repo::storage::Storage;
use crate::views::filters::{search_notes, NoteFilter};
use log::info;

pub struct NoteService<S: KvStore> {
    notes: RecordCollection<S, Note>,
}

impl<S: KvStore> NoteService<S> {
    pub fn open(storage: Storage<S>) -> ServiceResult<Self> {
        Ok(Self {
            notes: RecordCollection::load(storage)?,
        })
    }

    pub fn notes(&self) -> &[Note] {
        self.notes.records()
    }

    pub fn get(&self, id: &str) -> Option<&Note> {
        self.notes.find(id)
    }

    pub fn search(&self, filter: &NoteFilter) -> Vec<&Note> {
        search_notes(self.notes.records(), filter)
    }

    pub fn create(&mut self, draft: NoteDraft) -> ServiceResult<Note> {
        let note = draft.into_note();
        note.validate()?;
        self.notes.push(note.clone())?;
        info!("event=note_create module=service status=ok id={}", note.id);
        Ok(note)
    }

    pub fn update(&mut self, id: &str, patch: NotePatch) -> ServiceResult<Option<Note>> {
        let Some(mut note) = self.notes.find(id).cloned() else {
            return Ok(None);
        };
        patch.apply(&mut note);
        note.validate()?;
        self.notes.replace(note.clone())?;
        info!("event=note_update module=service status=ok id={id}");
        Ok(Some(note))
    }

    pub fn delete(&mut self, id: &str) -> ServiceResult<()> {
        if self.notes.remove(id)? {
            info!("event=note_delete module=service status=ok id={id}");
        }
        Ok(())
    }

    /// Flips `is_favorite`; returns the new value, or `None` if absent.
    pub fn toggle_favorite(&mut self, id: &str) -> ServiceResult<Option<bool>> {
        let Some(mut note) = self.notes.find(id).cloned() else {
            return Ok(None);
        };
        note.is_favorite = !note.is_favorite;
        let is_favorite = note.is_favorite;
        self.notes.replace(note)?;
        info!("event=note_favorite module=service status=ok id={id} favorite={is_favorite}");
        Ok(Some(is_favorite))
    }

    pub fn is_dirty(&self) -> bool {
        self.notes.is_dirty()
    }

    pub fn flush(&mut self) -> ServiceResult<()> {
        self.notes.flush()
    }
}
