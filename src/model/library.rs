use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::debug;

use crate::model::types::{ClassLike, Document, Namespace, Node};

/// A loaded interface description: the namespace being documented plus any
/// dependency namespaces pulled in through its `includes` list. Lookups
/// resolve qualified type names across all of them.
#[derive(Debug)]
pub struct Library {
    main: Document,
    dependencies: Vec<Document>,
}

/// A class-like type found by lookup, together with the namespace it was
/// declared in.
#[derive(Debug, Clone, Copy)]
pub struct TypeEntry<'a> {
    pub namespace: &'a str,
    pub node: ClassLike<'a>,
}

impl Library {
    /// Read the interface description at `path` and every namespace it
    /// includes. Include files are named `<Namespace>.json` and searched for
    /// in `include_dirs` in order; a missing include is an error because
    /// unresolvable parent types would otherwise fail much later, mid-render.
    pub fn load(path: &Path, include_dirs: &[PathBuf]) -> Result<Self> {
        let main = read_document(path)?;

        let mut dependencies = Vec::new();
        for include in &main.includes {
            let file = find_include(include, include_dirs).with_context(|| {
                format!(
                    "namespace {} includes {include}, but no {include}.json was found \
                     in the include directories",
                    main.namespace.name
                )
            })?;
            debug!(namespace = %include, path = %file.display(), "loading include");
            dependencies.push(read_document(&file)?);
        }

        Ok(Self { main, dependencies })
    }

    /// Build a library directly from parsed documents. Used by tests; the
    /// binary always goes through [`Library::load`].
    pub fn from_documents(main: Document, dependencies: Vec<Document>) -> Self {
        Self { main, dependencies }
    }

    pub fn namespace(&self) -> &Namespace {
        &self.main.namespace
    }

    fn namespaces(&self) -> impl Iterator<Item = &Namespace> {
        std::iter::once(&self.main.namespace)
            .chain(self.dependencies.iter().map(|d| &d.namespace))
    }

    /// Resolve a type name to a class or interface. Qualified names
    /// (`Ns.Name`) search the named namespace; bare names search the main
    /// namespace only.
    pub fn lookup_class_like(&self, name: &str) -> Option<TypeEntry<'_>> {
        let (ns_name, local) = match name.split_once('.') {
            Some((ns, local)) => (Some(ns), local),
            None => (None, name),
        };

        for ns in self.namespaces() {
            if let Some(wanted) = ns_name {
                if ns.name != wanted {
                    continue;
                }
            }
            for node in &ns.nodes {
                let class_like = match node {
                    Node::Class(c) => ClassLike::Class(c),
                    Node::Interface(i) => ClassLike::Interface(i),
                    Node::Record(_) | Node::Alias(_) | Node::Function(_) => continue,
                };
                if class_like.name() == local {
                    return Some(TypeEntry {
                        namespace: &ns.name,
                        node: class_like,
                    });
                }
            }
            if ns_name.is_none() {
                // Bare names never fall through to dependency namespaces.
                break;
            }
        }
        None
    }
}

fn read_document(path: &Path) -> Result<Document> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading interface description {}", path.display()))?;
    let doc: Document = serde_json::from_str(&text)
        .with_context(|| format!("parsing interface description {}", path.display()))?;
    if doc.namespace.name.is_empty() {
        bail!("interface description {} has an empty namespace name", path.display());
    }
    Ok(doc)
}

fn find_include(name: &str, include_dirs: &[PathBuf]) -> Option<PathBuf> {
    include_dirs
        .iter()
        .map(|dir| dir.join(format!("{name}.json")))
        .find(|candidate| candidate.is_file())
}
