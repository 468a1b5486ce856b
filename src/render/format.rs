use anyhow::Result;

use crate::markup::MarkupWriter;
use crate::model::{
    ClassLike, Function, Library, Owner, Parameter, Property, ReturnValue, Signal, SignalWhen,
    Transfer, TypeRef,
};
use crate::pages::parent_chain;

// Fixed layout of rendered signatures and summaries. Columns are offsets
// into preformatted synopsis text, not markup indentation.
pub const SIGNATURE_TYPE_WIDTH: usize = 20;
pub const SIGNATURE_PAREN_COLUMN: usize = 40;
pub const SIGNATURE_CONT_COLUMN: usize = 61;
pub const SUMMARY_NAME_WIDTH: usize = 27;
pub const SUMMARY_TYPE_WIDTH: usize = 22;
pub const HIERARCHY_INDENT_STEP: usize = 6;

fn pad(n: usize) -> String {
    " ".repeat(n)
}

/// Stateless rendering of single entities into markup fragments. Both
/// output dialects drive this one formatter; nothing here traverses the
/// page tree or touches the filesystem.
pub struct Formatter<'a> {
    library: &'a Library,
}

impl<'a> Formatter<'a> {
    pub fn new(library: &'a Library) -> Self {
        Self { library }
    }

    /// A callable signature: return type, symbol, aligned parameter list.
    /// With `link` the return type and symbol become cross-reference links.
    pub fn render_method(
        &self,
        w: &mut MarkupWriter,
        func: &Function,
        owner: Option<Owner<'_>>,
        link: bool,
    ) -> Result<()> {
        let retval = &func.retval;
        let link_dest = retval
            .ty
            .link_target()
            .unwrap_or_else(|| self.type_display(&retval.ty));
        w.element("link", &[("linkend", link_dest.as_str())], |w| {
            w.tag("returnvalue", &[], &link_dest)
        })?;
        if retval.ty.is_pointer() {
            w.text(" *")?;
        }

        let type_len = retval.ty.c_name().map_or(link_dest.len(), str::len);
        w.text(&pad(SIGNATURE_TYPE_WIDTH.saturating_sub(type_len)))?;

        if link {
            let dest = func.symbol.replace('_', "-");
            w.tag("link", &[("linkend", dest.as_str())], &func.symbol)?;
        } else {
            w.text(&func.symbol)?;
        }

        self.render_parameters(w, func, owner)
    }

    fn render_parameters(
        &self,
        w: &mut MarkupWriter,
        func: &Function,
        owner: Option<Owner<'_>>,
    ) -> Result<()> {
        w.text(&format!(
            "{}(",
            pad(SIGNATURE_PAREN_COLUMN.saturating_sub(func.symbol.len()))
        ))?;

        // The instance receiver renders first, synthesized as a pointer to
        // the owning type.
        let receiver = owner.map(|o| (o.name().to_lowercase(), format!("{}*", o.c_name())));
        let total = receiver.iter().len() + func.parameters.len();

        let mut index = 0;
        if let Some((name, c_type)) = &receiver {
            let comma = if total > 1 { ", " } else { "" };
            self.render_parameter(w, Some(c_type), name, comma)?;
            index += 1;
        }
        for param in &func.parameters {
            if index > 0 {
                w.text(&format!("\n{}", pad(SIGNATURE_CONT_COLUMN)))?;
            }
            let comma = if index + 1 < total { ", " } else { "" };
            match &param.ty {
                TypeRef::Varargs => {
                    w.element("parameter", &[], |w| {
                        w.text(&format!("...{comma}"))
                    })?;
                }
                ty => self.render_parameter(w, ty.c_name(), &param.name, comma)?,
            }
            index += 1;
        }

        w.text(");\n")
    }

    fn render_parameter(
        &self,
        w: &mut MarkupWriter,
        c_type: Option<&str>,
        name: &str,
        comma: &str,
    ) -> Result<()> {
        w.element("parameter", &[], |w| {
            match c_type {
                Some(c_type) => {
                    let link_dest = c_type.replace('*', "");
                    w.element("link", &[("linkend", link_dest.as_str())], |w| {
                        w.tag("type", &[], &link_dest)
                    })?;
                    let mut extra = String::from(" ");
                    if c_type.contains('*') {
                        extra.push('*');
                    }
                    extra.push_str(name);
                    extra.push_str(comma);
                    w.text(&extra)
                }
                // Not ascribable to a symbol: plain text, no link.
                None => w.text(&format!("{name}{comma}")),
            }
        })
    }

    /// The per-parameter documentation list: one entry per parameter plus a
    /// synthesized receiver entry and a trailing `Returns` entry.
    pub fn render_param_list(
        &self,
        w: &mut MarkupWriter,
        func: &Function,
        owner: Option<Owner<'_>>,
    ) -> Result<()> {
        self.render_param_entries(w, &func.parameters, &func.retval, owner)
    }

    /// Signal handlers document like callables: receiver, declared
    /// parameters, return value.
    pub fn render_signal_params(
        &self,
        w: &mut MarkupWriter,
        signal: &Signal,
        owner: Owner<'_>,
    ) -> Result<()> {
        self.render_param_entries(w, &signal.parameters, &signal.retval, Some(owner))
    }

    fn render_param_entries(
        &self,
        w: &mut MarkupWriter,
        parameters: &[Parameter],
        retval: &ReturnValue,
        owner: Option<Owner<'_>>,
    ) -> Result<()> {
        if let Some(owner) = owner {
            self.render_param_entry(w, &owner.name().to_lowercase(), Some("instance"), &[])?;
        }
        for param in parameters {
            let argname = match param.ty {
                TypeRef::Varargs => "...",
                _ => param.name.as_str(),
            };
            let annotations = self.annotations(&param.ty, param.transfer, param.nullable);
            self.render_param_entry(w, argname, param.doc.as_deref(), &annotations)?;
        }
        let annotations = self.annotations(&retval.ty, retval.transfer, retval.nullable);
        self.render_param_entry(w, "Returns", retval.doc.as_deref(), &annotations)
    }

    fn render_param_entry(
        &self,
        w: &mut MarkupWriter,
        name: &str,
        doc: Option<&str>,
        annotations: &[(&'static str, Option<String>)],
    ) -> Result<()> {
        w.element("varlistentry", &[], |w| {
            w.element("term", &[], |w| {
                w.tag("parameter", &[], name)?;
                if doc.is_some() {
                    w.text("\u{a0}:")?;
                }
                Ok(())
            })?;
            let Some(doc) = doc else {
                // Undocumented entries stay a bare term.
                return Ok(());
            };
            w.element("listitem", &[], |w| {
                w.element("simpara", &[], |w| {
                    w.text(doc)?;
                    if annotations.is_empty() {
                        return Ok(());
                    }
                    w.element("emphasis", &[("role", "annotation")], |w| {
                        for (key, value) in annotations {
                            match value {
                                Some(value) => w.text(&format!("[{key} {value}]"))?,
                                None => w.text(&format!("[{key}]"))?,
                            }
                        }
                        Ok(())
                    })
                })
            })
        })
    }

    /// Annotation bracket groups appended to a parameter description:
    /// container element type, non-default transfer, nullability.
    pub fn annotations(
        &self,
        ty: &TypeRef,
        transfer: Transfer,
        nullable: bool,
    ) -> Vec<(&'static str, Option<String>)> {
        let mut out = Vec::new();
        match ty {
            TypeRef::Array { element, .. } | TypeRef::List { element } => {
                out.push(("element-type", Some(self.type_display(element))));
            }
            _ => {}
        }
        if transfer != Transfer::None {
            out.push(("transfer", Some(transfer.as_str().to_string())));
        }
        if nullable {
            out.push(("allow-none", None));
        }
        out
    }

    pub fn render_property_line(&self, w: &mut MarkupWriter, prop: &Property) -> Result<()> {
        let name = format!("\"{}\"", prop.name);
        let ty = self.type_display(&prop.ty);
        w.text(&self.summary_line(&name, &ty, &self.property_flags(prop)))
    }

    pub fn render_signal_line(&self, w: &mut MarkupWriter, signal: &Signal) -> Result<()> {
        let name = format!("\"{}\"", signal.name);
        w.text(&self.summary_line(&name, "", &self.signal_flags(signal)))
    }

    /// Flag words for a property, in fixed check order.
    pub fn property_flags(&self, prop: &Property) -> Vec<&'static str> {
        let mut flags = Vec::new();
        if prop.readable {
            flags.push("Read");
        }
        if prop.writable {
            flags.push("Write");
        }
        if prop.construct {
            flags.push("Construct");
        }
        if prop.construct_only {
            flags.push("Construct Only");
        }
        flags
    }

    /// Flag words for a signal: emission timing first, then the modifiers.
    pub fn signal_flags(&self, signal: &Signal) -> Vec<&'static str> {
        let mut flags = Vec::new();
        flags.push(match signal.when {
            SignalWhen::First => "Run First",
            SignalWhen::Last => "Run Last",
            SignalWhen::Cleanup => "Cleanup",
        });
        if signal.no_recurse {
            flags.push("No Recursion");
        }
        if signal.detailed {
            flags.push("Has Details");
        }
        if signal.action {
            flags.push("Action");
        }
        if signal.no_hooks {
            flags.push("No Hooks");
        }
        flags
    }

    fn summary_line(&self, name: &str, ty: &str, flags: &[&str]) -> String {
        format!(
            "  {name:<name_w$}{ty:<ty_w$}: {flags}\n",
            name_w = SUMMARY_NAME_WIDTH,
            ty_w = SUMMARY_TYPE_WIDTH,
            flags = flags.join(" / "),
        )
    }

    pub fn type_display(&self, ty: &TypeRef) -> String {
        match ty {
            TypeRef::Plain { name, .. } => name.clone(),
            TypeRef::Array {
                element,
                container: None,
            } => format!("{}[]", self.type_display(element)),
            TypeRef::Array {
                element,
                container: Some(container),
            } => format!("{container}<{}>", self.type_display(element)),
            TypeRef::List { element } => format!("List<{}>", self.type_display(element)),
            TypeRef::Map { key, value } => format!(
                "Map<{}, {}>",
                self.type_display(key),
                self.type_display(value)
            ),
            TypeRef::Varargs => "...".to_string(),
            TypeRef::Unknown => "unknown".to_string(),
        }
    }

    /// The single-branch inheritance diagram for a class or interface:
    /// ancestors first, the documented type on the last line, connectors
    /// indented one fixed step per level.
    pub fn hierarchy_lines(&self, leaf: ClassLike<'_>) -> Result<Vec<String>> {
        let chain = parent_chain(self.library, leaf)?;
        let mut names: Vec<&str> = chain.iter().map(|entry| entry.node.display_name()).collect();
        names.push(leaf.display_name());

        Ok(names
            .iter()
            .enumerate()
            .map(|(level, name)| {
                let mut line = String::from("  ");
                if level > 0 {
                    line.push_str(&pad((level - 1) * HIERARCHY_INDENT_STEP));
                    line.push_str(" +----");
                }
                line.push_str(name);
                line
            })
            .collect())
    }
}
