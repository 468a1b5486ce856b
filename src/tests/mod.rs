mod page_graph_tests {
    use std::collections::HashSet;

    use crate::model::{
        Alias, Class, Document, Function, Interface, Library, Namespace, Node, Parameter,
        Property, Record, ReturnValue, Signal, SignalWhen, TypeRef,
    };
    use crate::pages::{PageGraph, ROOT_PAGE_ID};
    use crate::render::Language;

    pub(crate) fn plain(name: &str, c_name: &str) -> TypeRef {
        TypeRef::Plain {
            name: name.to_string(),
            c_name: Some(c_name.to_string()),
        }
    }

    pub(crate) fn sample_library() -> Library {
        let bar = Class {
            name: "Bar".to_string(),
            c_name: "NsBar".to_string(),
            type_name: Some("NsBar".to_string()),
            parent: Some("Core.Object".to_string()),
            doc: Some("A bar.\n\nSee #NsBaz for details.".to_string()),
            methods: vec![Function {
                name: "do_thing".to_string(),
                symbol: "ns_bar_do_thing".to_string(),
                doc: Some("Does the thing.".to_string()),
                parameters: vec![Parameter {
                    name: "value".to_string(),
                    doc: Some("how hard to do it".to_string()),
                    ty: plain("gint", "gint"),
                    ..Default::default()
                }],
                retval: ReturnValue {
                    ty: plain("gboolean", "gboolean"),
                    doc: Some("whether it worked".to_string()),
                    ..Default::default()
                },
            }],
            properties: vec![Property {
                name: "foo".to_string(),
                ty: plain("gboolean", "gboolean"),
                readable: true,
                writable: true,
                construct_only: true,
                ..Default::default()
            }],
            signals: vec![Signal {
                name: "changed".to_string(),
                when: SignalWhen::First,
                ..Default::default()
            }],
            ..Default::default()
        };
        let baz = Class {
            name: "Baz".to_string(),
            c_name: "NsBaz".to_string(),
            type_name: Some("NsBaz".to_string()),
            parent: Some("Bar".to_string()),
            doc: Some("Uses #Nope.".to_string()),
            ..Default::default()
        };
        let qux = Class {
            name: "Qux".to_string(),
            c_name: "NsQux".to_string(),
            type_name: Some("NsQux".to_string()),
            parent: Some("NS.Baz".to_string()),
            ..Default::default()
        };
        let rect = Record {
            name: "Rect".to_string(),
            c_name: "NsRect".to_string(),
            methods: vec![Function {
                name: "area".to_string(),
                symbol: "ns_rect_area".to_string(),
                retval: ReturnValue {
                    ty: plain("gint", "gint"),
                    ..Default::default()
                },
                ..Default::default()
            }],
            ..Default::default()
        };
        let ticker = Interface {
            name: "Ticker".to_string(),
            c_name: "NsTicker".to_string(),
            properties: vec![Property {
                name: "interval".to_string(),
                ty: plain("guint", "guint"),
                readable: true,
                ..Default::default()
            }],
            ..Default::default()
        };
        let alias = Alias {
            name: "Id".to_string(),
            c_name: "NsId".to_string(),
            target: plain("guint32", "guint32"),
            doc: None,
        };
        let init = Function {
            name: "init".to_string(),
            symbol: "ns_init".to_string(),
            parameters: vec![Parameter {
                name: "args".to_string(),
                ty: TypeRef::Varargs,
                ..Default::default()
            }],
            ..Default::default()
        };

        let namespace = Namespace {
            name: "NS".to_string(),
            version: Some("1.0".to_string()),
            doc: Some("A sample namespace.".to_string()),
            nodes: vec![
                Node::Class(bar),
                Node::Class(baz),
                Node::Class(qux),
                Node::Record(rect),
                Node::Interface(ticker),
                Node::Alias(alias),
                Node::Function(init),
            ],
        };
        Library::from_documents(
            Document {
                namespace,
                includes: Vec::new(),
            },
            Vec::new(),
        )
    }

    #[test]
    fn one_page_per_entity_with_unique_identifiers() {
        let library = sample_library();
        let graph = PageGraph::build(&library, Language::Python);

        // root + Bar(4) + Baz + Qux + Rect(2) + Ticker(2) + alias + function
        assert_eq!(graph.len(), 13);
        let ids: HashSet<&str> = graph.pages().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), graph.len());
    }

    #[test]
    fn identifiers_follow_lexical_rules() {
        let library = sample_library();
        let graph = PageGraph::build(&library, Language::Python);
        let ids: Vec<&str> = graph.pages().map(|p| p.id.as_str()).collect();

        assert!(ids.contains(&"NS.Bar.do_thing"));
        assert!(ids.contains(&"NS.Bar-foo"));
        assert!(ids.contains(&"NS.Bar--changed"));
        assert!(ids.contains(&"NS.init"));
        assert_eq!(graph.root().id, ROOT_PAGE_ID);
    }

    #[test]
    fn identifiers_are_deterministic() {
        let library = sample_library();
        let first: Vec<String> = PageGraph::build(&library, Language::Python)
            .pages()
            .map(|p| p.id.clone())
            .collect();
        let second: Vec<String> = PageGraph::build(&library, Language::Python)
            .pages()
            .map(|p| p.id.clone())
            .collect();
        assert_eq!(first, second);
    }

    #[test]
    fn unknown_typed_property_is_skipped() {
        let odd = Class {
            name: "Odd".to_string(),
            c_name: "NsOdd".to_string(),
            properties: vec![Property {
                name: "mystery".to_string(),
                ty: TypeRef::Unknown,
                readable: true,
                ..Default::default()
            }],
            ..Default::default()
        };
        let library = Library::from_documents(
            Document {
                namespace: Namespace {
                    name: "NS".to_string(),
                    nodes: vec![Node::Class(odd)],
                    ..Default::default()
                },
                includes: Vec::new(),
            },
            Vec::new(),
        );
        let graph = PageGraph::build(&library, Language::Python);
        assert_eq!(graph.len(), 2);
        assert!(graph.pages().all(|p| p.id != "NS.Odd-mystery"));
    }

    #[test]
    fn pages_carry_classification_and_links() {
        let library = sample_library();
        let graph = PageGraph::build(&library, Language::Python);

        let root = graph.root();
        assert_eq!(root.page_type, "guide");
        assert_eq!(root.style, "namespace");
        assert!(root.links.is_empty());

        let bar = graph.pages().find(|p| p.id == "NS.Bar").unwrap();
        assert_eq!(bar.style, "class");
        assert!(bar
            .links
            .iter()
            .any(|l| l.kind == "guide" && l.target == "index" && l.group == Some("class")));

        let method = graph.pages().find(|p| p.id == "NS.Bar.do_thing").unwrap();
        assert_eq!(method.style, "method");
        assert!(method
            .links
            .iter()
            .any(|l| l.target == "NS.Bar" && l.group == Some("method")));
    }

    #[test]
    fn cross_references_resolve_symbols_to_page_identifiers() {
        let library = sample_library();
        let graph = PageGraph::build(&library, Language::Python);

        assert_eq!(graph.lookup_xref("ns_bar_do_thing"), Some("NS.Bar.do_thing"));
        assert_eq!(graph.lookup_xref("NsBar"), Some("NS.Bar"));
        assert_eq!(graph.lookup_xref("NsBar:foo"), Some("NS.Bar-foo"));
        assert_eq!(graph.lookup_xref("NsBar::changed"), Some("NS.Bar--changed"));
        assert_eq!(graph.lookup_xref("ns_init"), Some("NS.init"));
        assert_eq!(graph.lookup_xref("NoSuchThing"), None);
    }

    #[test]
    fn member_pages_form_a_tree_under_their_owner() {
        let library = sample_library();
        let graph = PageGraph::build(&library, Language::Python);

        for page in graph.pages() {
            match page.parent {
                None => assert_eq!(page.id, ROOT_PAGE_ID),
                Some(parent) => {
                    assert!(graph.page(parent).children.iter().any(|&c| {
                        graph.page(c).id == page.id
                    }));
                }
            }
        }
    }
}

mod parent_chain_tests {
    use super::page_graph_tests::sample_library;
    use crate::model::{Class, ClassLike, Document, Library, Namespace, Node};
    use crate::pages::parent_chain;

    fn find_class<'a>(library: &'a Library, name: &str) -> &'a Class {
        library
            .namespace()
            .nodes
            .iter()
            .find_map(|node| match node {
                Node::Class(c) if c.name == name => Some(c),
                _ => None,
            })
            .unwrap()
    }

    #[test]
    fn no_declared_parent_yields_empty_chain() {
        let library = sample_library();
        let solo = Class {
            name: "Solo".to_string(),
            c_name: "NsSolo".to_string(),
            ..Default::default()
        };
        let chain = parent_chain(&library, ClassLike::Class(&solo)).unwrap();
        assert!(chain.is_empty());
    }

    #[test]
    fn chain_stops_short_of_the_root_type() {
        let library = sample_library();
        let bar = find_class(&library, "Bar");
        let chain = parent_chain(&library, ClassLike::Class(bar)).unwrap();
        assert!(chain.is_empty());
    }

    #[test]
    fn three_level_chain_orders_ancestors_root_first() {
        let library = sample_library();
        let qux = find_class(&library, "Qux");
        let chain = parent_chain(&library, ClassLike::Class(qux)).unwrap();
        let names: Vec<&str> = chain.iter().map(|entry| entry.node.name()).collect();
        assert_eq!(names, vec!["Bar", "Baz"]);
    }

    #[test]
    fn parent_cycle_is_reported_not_looped() {
        let a = Class {
            name: "A".to_string(),
            c_name: "NsA".to_string(),
            parent: Some("NS.B".to_string()),
            ..Default::default()
        };
        let b = Class {
            name: "B".to_string(),
            c_name: "NsB".to_string(),
            parent: Some("NS.A".to_string()),
            ..Default::default()
        };
        let library = Library::from_documents(
            Document {
                namespace: Namespace {
                    name: "NS".to_string(),
                    nodes: vec![Node::Class(a), Node::Class(b)],
                    ..Default::default()
                },
                includes: Vec::new(),
            },
            Vec::new(),
        );
        let a = find_class(&library, "A");
        let err = parent_chain(&library, ClassLike::Class(a)).unwrap_err();
        assert!(err.to_string().contains("cycle"), "unexpected error: {err}");
    }

    #[test]
    fn unresolvable_parent_is_a_contract_error() {
        let library = sample_library();
        let lost = Class {
            name: "Lost".to_string(),
            c_name: "NsLost".to_string(),
            parent: Some("NS.Missing".to_string()),
            ..Default::default()
        };
        assert!(parent_chain(&library, ClassLike::Class(&lost)).is_err());
    }
}

mod formatter_tests {
    use super::page_graph_tests::{plain, sample_library};
    use crate::markup::MarkupWriter;
    use crate::model::{
        ClassLike, Function, Node, Owner, Parameter, Property, ReturnValue, Signal, SignalWhen,
        Transfer, TypeRef,
    };
    use crate::render::Formatter;

    #[test]
    fn property_flags_keep_fixed_order() {
        let library = sample_library();
        let formatter = Formatter::new(&library);
        let prop = Property {
            name: "foo".to_string(),
            ty: plain("gboolean", "gboolean"),
            readable: true,
            writable: true,
            construct_only: true,
            ..Default::default()
        };
        assert_eq!(
            formatter.property_flags(&prop).join(" / "),
            "Read / Write / Construct Only"
        );
    }

    #[test]
    fn signal_flags_start_with_emission_timing() {
        let library = sample_library();
        let formatter = Formatter::new(&library);
        let signal = Signal {
            name: "clicked".to_string(),
            when: SignalWhen::First,
            detailed: true,
            action: true,
            ..Default::default()
        };
        assert_eq!(
            formatter.signal_flags(&signal),
            vec!["Run First", "Has Details", "Action"]
        );
    }

    #[test]
    fn property_summary_line_is_column_aligned() {
        let library = sample_library();
        let formatter = Formatter::new(&library);
        let prop = Property {
            name: "foo".to_string(),
            ty: plain("gboolean", "gboolean"),
            readable: true,
            writable: true,
            construct_only: true,
            ..Default::default()
        };

        let mut w = MarkupWriter::new();
        w.element("synopsis", &[], |w| {
            formatter.render_property_line(w, &prop)
        })
        .unwrap();
        let out = w.into_string().unwrap();

        let expected = format!(
            "  {:<27}{:<22}: Read / Write / Construct Only\n",
            "\"foo\"", "gboolean"
        )
        .replace('"', "&quot;");
        assert!(out.contains(&expected), "missing summary line in: {out}");
    }

    #[test]
    fn zero_parameter_method_documents_receiver_and_returns() {
        let library = sample_library();
        let formatter = Formatter::new(&library);
        let bar = library
            .namespace()
            .nodes
            .iter()
            .find_map(|node| match node {
                Node::Class(c) if c.name == "Bar" => Some(c),
                _ => None,
            })
            .unwrap();
        let func = Function {
            name: "reset".to_string(),
            symbol: "ns_bar_reset".to_string(),
            ..Default::default()
        };

        let mut w = MarkupWriter::new();
        w.element("variablelist", &[], |w| {
            formatter.render_param_list(w, &func, Some(Owner::Class(bar)))
        })
        .unwrap();
        let out = w.into_string().unwrap();

        assert_eq!(out.matches("<varlistentry>").count(), 2);
        assert!(out.contains("<parameter>bar</parameter>"));
        assert!(out.contains("<parameter>Returns</parameter>"));
    }

    #[test]
    fn signature_parenthesis_sits_at_fixed_column() {
        let library = sample_library();
        let formatter = Formatter::new(&library);
        let bar = library
            .namespace()
            .nodes
            .iter()
            .find_map(|node| match node {
                Node::Class(c) if c.name == "Bar" => Some(c),
                _ => None,
            })
            .unwrap();
        let func = &bar.methods[0];

        let mut w = MarkupWriter::new();
        w.element("programlisting", &[], |w| {
            formatter.render_method(w, func, Some(Owner::Class(bar)), false)
        })
        .unwrap();
        let out = w.into_string().unwrap();

        // symbol is 15 chars, the parenthesis opens at column 40
        let expected = format!("ns_bar_do_thing{}(", " ".repeat(25));
        assert!(out.contains(&expected), "bad alignment in: {out}");
        // the second entry continues on its own line under the parenthesis
        assert!(out.contains(&format!("\n{}<parameter>", " ".repeat(61))));
        // the receiver renders first, as a pointer to the owning type
        assert!(out.contains("<type>NsBar</type></link> *bar, "));
        assert!(out.contains(");\n"));
    }

    #[test]
    fn variadic_parameter_renders_as_ellipsis() {
        let library = sample_library();
        let formatter = Formatter::new(&library);
        let func = Function {
            name: "log".to_string(),
            symbol: "ns_log".to_string(),
            parameters: vec![Parameter {
                name: "args".to_string(),
                ty: TypeRef::Varargs,
                ..Default::default()
            }],
            ..Default::default()
        };

        let mut w = MarkupWriter::new();
        w.element("programlisting", &[], |w| {
            formatter.render_method(w, &func, None, false)
        })
        .unwrap();
        let out = w.into_string().unwrap();
        assert!(out.contains("<parameter>...</parameter>"));
    }

    #[test]
    fn container_types_render_with_element_notation() {
        let library = sample_library();
        let formatter = Formatter::new(&library);
        let gint = plain("gint", "gint");

        assert_eq!(
            formatter.type_display(&TypeRef::Array {
                element: Box::new(gint.clone()),
                container: None,
            }),
            "gint[]"
        );
        assert_eq!(
            formatter.type_display(&TypeRef::Array {
                element: Box::new(plain("utf8", "char*")),
                container: Some("Array".to_string()),
            }),
            "Array<utf8>"
        );
        assert_eq!(
            formatter.type_display(&TypeRef::List {
                element: Box::new(plain("utf8", "char*")),
            }),
            "List<utf8>"
        );
        assert_eq!(
            formatter.type_display(&TypeRef::Map {
                key: Box::new(plain("utf8", "char*")),
                value: Box::new(gint),
            }),
            "Map<utf8, gint>"
        );
    }

    #[test]
    fn annotations_cover_element_type_transfer_and_nullability() {
        let library = sample_library();
        let formatter = Formatter::new(&library);

        let list = TypeRef::List {
            element: Box::new(plain("utf8", "char*")),
        };
        let annotations = formatter.annotations(&list, Transfer::Container, true);
        assert_eq!(
            annotations,
            vec![
                ("element-type", Some("utf8".to_string())),
                ("transfer", Some("container".to_string())),
                ("allow-none", None),
            ]
        );

        let bare = formatter.annotations(&plain("gint", "gint"), Transfer::None, false);
        assert!(bare.is_empty());
    }

    #[test]
    fn hierarchy_indents_one_step_per_level() {
        let library = sample_library();
        let formatter = Formatter::new(&library);
        let qux = library
            .namespace()
            .nodes
            .iter()
            .find_map(|node| match node {
                Node::Class(c) if c.name == "Qux" => Some(c),
                _ => None,
            })
            .unwrap();

        let lines = formatter.hierarchy_lines(ClassLike::Class(qux)).unwrap();
        assert_eq!(
            lines,
            vec![
                "  NsBar".to_string(),
                "   +----NsBaz".to_string(),
                "         +----NsQux".to_string(),
            ]
        );
    }

    #[test]
    fn undocumented_parameter_stays_a_bare_term() {
        let library = sample_library();
        let formatter = Formatter::new(&library);
        let func = Function {
            name: "poke".to_string(),
            symbol: "ns_poke".to_string(),
            parameters: vec![Parameter {
                name: "target".to_string(),
                ty: plain("gpointer", "gpointer"),
                ..Default::default()
            }],
            retval: ReturnValue::default(),
            ..Default::default()
        };

        let mut w = MarkupWriter::new();
        w.element("variablelist", &[], |w| {
            formatter.render_param_list(w, &func, None)
        })
        .unwrap();
        let out = w.into_string().unwrap();

        let entry = out
            .split("<varlistentry>")
            .find(|chunk| chunk.contains("<parameter>target</parameter>"))
            .unwrap();
        let entry_end = entry.find("</varlistentry>").unwrap();
        assert!(!entry[..entry_end].contains("<listitem>"));
    }
}

mod inline_tests {
    use crate::render::inline::{segments, Segment};

    #[test]
    fn plain_text_is_one_segment() {
        let all: Vec<_> = segments("no markers here").collect();
        assert_eq!(all, vec![Segment::Text("no markers here")]);
    }

    #[test]
    fn markers_split_literal_runs() {
        let all: Vec<_> = segments("see #NsBar now").collect();
        assert_eq!(
            all,
            vec![
                Segment::Text("see "),
                Segment::Marker("NsBar"),
                Segment::Text(" now"),
            ]
        );
    }

    #[test]
    fn token_charset_includes_digits_and_punctuation() {
        let all: Vec<_> = segments("#NsArea2D and #NsBar:foo").collect();
        assert_eq!(all[0], Segment::Marker("NsArea2D"));
        assert_eq!(all[2], Segment::Marker("NsBar:foo"));
    }

    #[test]
    fn bare_marker_stays_literal() {
        let all: Vec<_> = segments("100# units").collect();
        assert_eq!(
            all,
            vec![
                Segment::Text("100"),
                Segment::Text("#"),
                Segment::Text(" units"),
            ]
        );
    }

    #[test]
    fn marker_at_end_of_text() {
        let all: Vec<_> = segments("ends with #NsBar").collect();
        assert_eq!(all.last(), Some(&Segment::Marker("NsBar")));
    }
}

mod markup_tests {
    use anyhow::bail;

    use crate::markup::MarkupWriter;

    #[test]
    fn text_is_escaped() {
        let mut w = MarkupWriter::new();
        w.tag("t", &[], "a<b&c").unwrap();
        let out = w.into_string().unwrap();
        assert!(out.contains("a&lt;b&amp;c"));
    }

    #[test]
    fn open_tags_close_even_when_the_body_fails() {
        let mut w = MarkupWriter::new();
        let result = w.element("outer", &[], |w| {
            w.text("partial")?;
            bail!("body failed");
        });
        assert!(result.is_err());

        let out = w.into_string().unwrap();
        assert!(out.contains("<outer>"));
        assert!(out.contains("</outer>"));
    }
}

mod writer_tests {
    use std::collections::HashSet;

    use super::page_graph_tests::sample_library;
    use crate::pages::PageGraph;
    use crate::render::{DocBookWriter, Language, MallardWriter};

    #[test]
    fn docbook_document_opens_with_the_doctype() {
        let library = sample_library();
        let graph = PageGraph::build(&library, Language::Python);
        let out = DocBookWriter::new(Language::Python)
            .render(&library, &graph)
            .unwrap();
        assert!(out.starts_with("<!DOCTYPE"));
        assert!(out.contains("xml:id=\"page_NS\""));
        assert!(out.contains("NS Documentation"));
    }

    #[test]
    fn docbook_omits_sections_for_empty_collections() {
        let library = sample_library();
        let graph = PageGraph::build(&library, Language::Python);
        let out = DocBookWriter::new(Language::Python)
            .render(&library, &graph)
            .unwrap();

        // Bar has properties and signals, Baz has neither.
        assert!(out.contains("NsBar.properties"));
        assert!(out.contains("NsBar.signals"));
        assert!(!out.contains("NsBaz.properties"));
        assert!(!out.contains("NsBaz.signals"));
    }

    #[test]
    fn docbook_method_anchors_use_hyphens_and_keep_symbols_in_the_index() {
        let library = sample_library();
        let graph = PageGraph::build(&library, Language::Python);
        let out = DocBookWriter::new(Language::Python)
            .render(&library, &graph)
            .unwrap();

        assert!(out.contains("id=\"ns-bar-do-thing\""));
        assert!(out.contains("<primary>ns_bar_do_thing</primary>"));
    }

    #[test]
    fn docbook_struct_synopsis_follows_the_language_strategy() {
        let library = sample_library();
        let graph = PageGraph::build(&library, Language::C);
        let out = DocBookWriter::new(Language::C)
            .render(&library, &graph)
            .unwrap();
        assert!(out.contains("struct NsBar;"));

        let graph = PageGraph::build(&library, Language::Python);
        let out = DocBookWriter::new(Language::Python)
            .render(&library, &graph)
            .unwrap();
        assert!(out.contains("class NS.Bar"));
    }

    #[test]
    fn language_strategy_selects_member_titles() {
        let library = sample_library();

        let python = PageGraph::build(&library, Language::Python);
        let prop = python.pages().find(|p| p.id == "NS.Bar-foo").unwrap();
        assert_eq!(prop.title, "NS.Bar:foo");

        let c = PageGraph::build(&library, Language::C);
        let prop = c.pages().find(|p| p.id == "NS.Bar-foo").unwrap();
        assert_eq!(prop.title, "The \"foo\" property");
        let class = c.pages().find(|p| p.id == "NS.Bar").unwrap();
        assert_eq!(class.title, "NsBar");
    }

    #[test]
    fn mallard_outbound_links_point_at_generated_pages() {
        let library = sample_library();
        let graph = PageGraph::build(&library, Language::Python);
        let ids: HashSet<&str> = graph.pages().map(|p| p.id.as_str()).collect();

        for page in graph.pages() {
            for link in &page.links {
                assert!(
                    ids.contains(link.target.as_str()),
                    "page {} links to missing target {}",
                    page.id,
                    link.target
                );
            }
        }
    }

    #[test]
    fn mallard_root_page_is_the_index_guide() {
        let library = sample_library();
        let graph = PageGraph::build(&library, Language::Python);
        let writer = MallardWriter::new(Language::Python);
        let out = writer
            .render_page(&library, &graph, graph.root())
            .unwrap();

        assert!(out.contains("id=\"index\""));
        assert!(out.contains("type=\"guide\""));
        assert!(out.contains("style=\"namespace\""));
        assert!(out.contains("groups=\"class\""));
        assert!(out.contains("<title>Classes</title>"));
    }

    #[test]
    fn mallard_resolves_markers_and_tolerates_misses() {
        let library = sample_library();
        let graph = PageGraph::build(&library, Language::Python);
        let writer = MallardWriter::new(Language::Python);

        // Bar's documentation references #NsBaz, which has a page.
        let bar = graph.pages().find(|p| p.id == "NS.Bar").unwrap();
        let out = writer.render_page(&library, &graph, bar).unwrap();
        assert!(out.contains("<link xref=\"NS.Baz\">NsBaz</link>"));

        // Baz's documentation references #Nope, which resolves to nothing.
        let baz = graph.pages().find(|p| p.id == "NS.Baz").unwrap();
        let out = writer.render_page(&library, &graph, baz).unwrap();
        assert!(out.contains("Nope"));
        assert!(!out.contains("xref=\"Nope\""));
    }

    #[test]
    fn mallard_omits_links_sections_for_absent_member_kinds() {
        let library = sample_library();
        let graph = PageGraph::build(&library, Language::Python);
        let writer = MallardWriter::new(Language::Python);

        // Baz is a class with no members at all.
        let baz = graph.pages().find(|p| p.id == "NS.Baz").unwrap();
        let out = writer.render_page(&library, &graph, baz).unwrap();
        assert!(!out.contains("groups=\"property\""));
        assert!(!out.contains("groups=\"signal\""));
        assert!(!out.contains("<title>Methods</title>"));
        assert!(out.contains("groups=\"#first #default #last\""));
    }

    #[test]
    fn mallard_hierarchy_nests_ancestors_outermost() {
        let library = sample_library();
        let graph = PageGraph::build(&library, Language::Python);
        let writer = MallardWriter::new(Language::Python);

        let qux = graph.pages().find(|p| p.id == "NS.Qux").unwrap();
        let out = writer.render_page(&library, &graph, qux).unwrap();

        let bar = out.find("<code xref=\"NS.Bar\">NS.Bar</code>").unwrap();
        let baz = out.find("<code xref=\"NS.Baz\">NS.Baz</code>").unwrap();
        let leaf = out.find("<code xref=\"NS.Qux\">NS.Qux</code>").unwrap();
        assert!(bar < baz && baz < leaf);
    }
}
