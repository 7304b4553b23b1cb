use widgetdom::{Document, DomError, Element, ROOT_ID};

fn cards_container() -> Document {
    let doc = Document::new();
    doc.append(
        ROOT_ID,
        Element::div()
            .id("list")
            .child(Element::div().id("first").attr("data-expandable", ""))
            .child(Element::div().id("plain"))
            .child(
                Element::div()
                    .id("wrapper")
                    .child(Element::div().id("second").attr("data-expandable", "")),
            ),
    )
    .unwrap();
    doc
}

#[test]
fn test_query_attr_in_document_order() {
    let doc = cards_container();
    assert_eq!(doc.query_attr("list", "data-expandable"), vec!["first", "second"]);
    assert!(doc.query_attr("plain", "data-expandable").is_empty());
}

#[test]
fn test_replace_keeps_position() {
    let doc = cards_container();
    doc.replace("plain", Element::span().id("swapped")).unwrap();

    assert_eq!(doc.children("list"), vec!["first", "swapped", "wrapper"]);
    assert!(!doc.exists("plain"));
    assert_eq!(doc.parent("swapped").as_deref(), Some("list"));
}

#[test]
fn test_replace_can_reuse_id() {
    let doc = cards_container();
    doc.replace("first", Element::div().id("first").class("upgraded"))
        .unwrap();

    assert!(doc.has_class("first", "upgraded"));
    assert_eq!(doc.children("list")[0], "first");
}

#[test]
fn test_root_is_immutable() {
    let doc = Document::new();
    assert_eq!(doc.remove(ROOT_ID), Err(DomError::RootImmutable));
    assert_eq!(
        doc.replace(ROOT_ID, Element::div()),
        Err(DomError::RootImmutable)
    );
}

#[test]
fn test_missing_nodes_report_not_found() {
    let doc = Document::new();
    assert_eq!(
        doc.set_attr("nope", "a", "b"),
        Err(DomError::NodeNotFound("nope".into()))
    );
    assert_eq!(doc.attr("nope", "a"), None);
    assert!(!doc.has_class("nope", "x"));
}

#[test]
fn test_classes_and_attributes() {
    let doc = cards_container();
    doc.add_class("first", "expanded").unwrap();
    doc.add_class("first", "expanded").unwrap();
    doc.set_attr("first", "aria-expanded", "true").unwrap();

    assert!(doc.has_class("first", "expanded"));
    assert_eq!(doc.attr("first", "aria-expanded").as_deref(), Some("true"));

    doc.remove_class("first", "expanded").unwrap();
    assert!(!doc.has_class("first", "expanded"));
    assert_eq!(
        doc.remove_attr("first", "aria-expanded").unwrap().as_deref(),
        Some("true")
    );
}

#[test]
fn test_markup_round_trip() {
    let doc = Document::new();
    doc.append(
        ROOT_ID,
        Element::div()
            .id("card")
            .child(Element::div().id("title").attr("data-collapsed", "").markup("<b>Hi</b>"))
            .child(Element::span().id("more").class("x").hidden(true)),
    )
    .unwrap();

    assert_eq!(doc.inner_markup("title").unwrap(), "<b>Hi</b>");
    assert_eq!(
        doc.inner_markup("card").unwrap(),
        "<div id=\"title\" data-collapsed=\"\"><b>Hi</b></div>\
         <span id=\"more\" class=\"x\" hidden></span>"
    );

    doc.set_markup("card", "<p>replaced</p>").unwrap();
    assert!(!doc.exists("title"));
    assert_eq!(doc.outer_markup("card").unwrap(), "<div id=\"card\"><p>replaced</p></div>");
}

#[test]
fn test_first_child_with_attr_only_looks_one_level() {
    let doc = cards_container();
    assert_eq!(doc.first_child_with_attr("list", "data-expandable").as_deref(), Some("first"));
    assert_eq!(doc.first_child_with_attr("plain", "data-expandable"), None);
    assert_eq!(doc.first_child_with_attr(ROOT_ID, "data-expandable"), None);
}
