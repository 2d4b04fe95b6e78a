//! Declaration feed produced by the source front end.
//!
//! The front end serializes `{ "declarations": [...] }` as JSON. Loading
//! checks the structural contract the rest of the engine relies on: ids are
//! unique, every parent exists, and parent chains terminate.

use crate::core::{Declaration, DeclarationId};
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Serialize, Deserialize)]
struct FeedDocument {
    declarations: Vec<Declaration>,
}

#[derive(Debug, Clone, Default)]
pub struct DeclarationSet {
    declarations: Vec<Declaration>,
    index: HashMap<DeclarationId, usize>,
}

impl DeclarationSet {
    pub fn new(declarations: Vec<Declaration>) -> Result<Self> {
        let mut index = HashMap::with_capacity(declarations.len());
        for (pos, decl) in declarations.iter().enumerate() {
            if index.insert(decl.id, pos).is_some() {
                return Err(Error::Feed(format!("duplicate declaration id {}", decl.id)));
            }
        }

        let set = Self {
            declarations,
            index,
        };
        set.check_parents()?;
        Ok(set)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let document: FeedDocument = serde_json::from_str(json)?;
        Self::new(document.declarations)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .map_err(|e| Error::io("Failed to read declaration feed", path, e))?;
        Self::from_json(&json).map_err(|e| e.with_context(format!("{}", path.display())))
    }

    pub fn get(&self, id: DeclarationId) -> Option<&Declaration> {
        self.index.get(&id).map(|&pos| &self.declarations[pos])
    }

    /// Enclosing declarations, innermost first.
    pub fn ancestors<'a>(&'a self, decl: &'a Declaration) -> impl Iterator<Item = &'a Declaration> {
        std::iter::successors(decl.parent.and_then(|id| self.get(id)), move |current| {
            current.parent.and_then(|id| self.get(id))
        })
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Declaration> {
        self.declarations.iter()
    }

    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    fn check_parents(&self) -> Result<()> {
        for decl in &self.declarations {
            let mut steps = 0;
            let mut current = decl.parent;
            while let Some(id) = current {
                let parent = self.get(id).ok_or_else(|| {
                    Error::Feed(format!("declaration {} has unknown parent {}", decl.id, id))
                })?;
                steps += 1;
                if steps > self.declarations.len() {
                    return Err(Error::Feed(format!(
                        "declaration {} is part of a parent cycle",
                        decl.id
                    )));
                }
                current = parent.parent;
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a DeclarationSet {
    type Item = &'a Declaration;
    type IntoIter = std::slice::Iter<'a, Declaration>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
