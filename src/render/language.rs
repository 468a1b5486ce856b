use clap::ValueEnum;

use crate::pages::PageNode;

/// Target-audience policy for titles and struct synopses. `Python` renders
/// native-style names (`Ns.Name`), `C` renders the underlying symbols and
/// struct declarations. Pure lookups, no state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Language {
    Python,
    C,
}

impl Language {
    pub fn title(&self, namespace: &str, node: &PageNode<'_>) -> String {
        match node {
            PageNode::Namespace(ns) => format!("{} Documentation", ns.name),
            PageNode::Class(c) => match self {
                Language::Python => format!("{namespace}.{}", c.name),
                Language::C => c.c_name.clone(),
            },
            PageNode::Record(r) => match self {
                Language::Python => format!("{namespace}.{}", r.name),
                Language::C => r.c_name.clone(),
            },
            PageNode::Interface(i) => match self {
                Language::Python => format!("{namespace}.{}", i.name),
                Language::C => i.c_name.clone(),
            },
            PageNode::Alias(a) => match self {
                Language::Python => format!("{namespace}.{}", a.name),
                Language::C => a.c_name.clone(),
            },
            PageNode::Function { func, .. } => format!("{} ()", func.symbol),
            PageNode::Property { prop, owner } => match self {
                Language::Python => format!("{namespace}.{}:{}", owner.name(), prop.name),
                Language::C => format!("The \"{}\" property", prop.name),
            },
            PageNode::Signal { signal, owner } => match self {
                Language::Python => format!("{namespace}.{}::{}", owner.name(), signal.name),
                Language::C => format!("The \"{}\" signal", signal.name),
            },
        }
    }

    /// The one-line struct synopsis opening a type chapter, when the page
    /// kind has one.
    pub fn synopsis_line(&self, namespace: &str, node: &PageNode<'_>) -> Option<String> {
        match node {
            PageNode::Class(c) => Some(self.type_synopsis(namespace, &c.name, &c.c_name)),
            PageNode::Record(r) => Some(self.type_synopsis(namespace, &r.name, &r.c_name)),
            PageNode::Interface(i) => Some(self.type_synopsis(namespace, &i.name, &i.c_name)),
            PageNode::Alias(a) => Some(match self {
                Language::Python => format!("{namespace}.{}", a.name),
                Language::C => format!("typedef {}", a.c_name),
            }),
            _ => None,
        }
    }

    fn type_synopsis(&self, namespace: &str, name: &str, c_name: &str) -> String {
        match self {
            Language::Python => format!("class {namespace}.{name}"),
            Language::C => format!("struct {c_name};"),
        }
    }
}
