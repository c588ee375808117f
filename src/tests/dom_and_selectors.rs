use super::*;

#[test]
fn parses_nested_structure_and_text() -> Result<()> {
    let dom = parse_html(
        r#"
        <!DOCTYPE html>
        <!-- listing header -->
        <div id='wrap' class='outer shaded'>
          <h3>Trips &amp; Tours</h3>
          <img src='hero.png'>
          <p>From 99&nbsp;&euro;
        </div>
        "#,
    )?;

    let wrap = dom.query_selector("#wrap")?.expect("wrap exists");
    assert_eq!(dom.tag_name(wrap), Some("div"));
    assert_eq!(
        dom.text_content(dom.query_selector("h3")?.expect("h3")),
        "Trips & Tours"
    );
    assert!(dom.query_selector("img")?.is_some());
    Ok(())
}

#[test]
fn entity_references_decode_in_text_and_attributes() -> Result<()> {
    let dom = parse_html(r#"<p id='x' title='A &quot;B&quot;'>Kyoto &bull; Fall &#233;</p>"#)?;
    let p = dom.query_selector("#x")?.expect("p exists");

    assert_eq!(dom.text_content(p), "Kyoto • Fall é");
    assert_eq!(dom.attr(p, "title").as_deref(), Some(r#"A "B""#));
    Ok(())
}

#[test]
fn bare_and_unquoted_attributes_parse() -> Result<()> {
    let dom = parse_html("<input id=field disabled data-kind=hidden>")?;
    let input = dom.query_selector("#field")?.expect("input exists");

    assert!(dom.disabled(input));
    assert_eq!(dom.attr(input, "data-kind").as_deref(), Some("hidden"));
    Ok(())
}

#[test]
fn list_items_and_paragraphs_close_implicitly() -> Result<()> {
    let dom = parse_html(
        r#"
        <ul>
          <li id='first'>one
          <li id='second'>two
        </ul>
        <p id='para'>lead
        <div id='after'>block</div>
        "#,
    )?;

    let first = dom.query_selector("#first")?.expect("first li");
    let second = dom.query_selector("#second")?.expect("second li");
    assert_eq!(dom.parent(first), dom.parent(second));
    assert_eq!(dom.text_content(first).trim(), "one");

    let para = dom.query_selector("#para")?.expect("p");
    let after = dom.query_selector("#after")?.expect("div");
    assert_eq!(dom.parent(para), dom.parent(after));
    Ok(())
}

#[test]
fn script_and_style_content_is_raw_text() -> Result<()> {
    let dom = parse_html(
        r#"
        <style>.slide { display: none; }</style>
        <script>if (idx < slides.length) { show(idx); }</script>
        <div id='real'></div>
        "#,
    )?;

    assert!(dom.query_selector("#real")?.is_some());
    // The comparison inside the script is not mistaken for a tag.
    assert!(dom.query_selector("slides")?.is_none());
    let script = dom.query_selector("script")?.expect("script");
    assert!(dom.text_content(script).contains("idx < slides.length"));
    Ok(())
}

#[test]
fn malformed_attribute_junk_is_skipped() -> Result<()> {
    let dom = parse_html(r#"<a id='k' href=""/en/"tools/">docs</a>"#)?;
    let a = dom.query_selector("#k")?.expect("anchor");
    assert_eq!(dom.text_content(a), "docs");
    Ok(())
}

#[test]
fn unclosed_comment_is_a_parse_error() {
    let err = parse_html("<div><!-- dangling").unwrap_err();
    assert!(matches!(err, Error::HtmlParse(_)));
}

#[test]
fn closest_walks_ancestors_including_self() -> Result<()> {
    let dom = parse_html(
        r#"
        <div class='card' id='card'>
          <div><button id='btn'>go</button></div>
        </div>
        "#,
    )?;

    let btn = dom.query_selector("#btn")?.expect("button");
    let card = dom.query_selector("#card")?.expect("card");
    assert_eq!(dom.closest(btn, ".card")?, Some(card));
    assert_eq!(dom.closest(card, ".card")?, Some(card));
    assert_eq!(dom.closest(btn, ".missing")?, None);
    Ok(())
}

#[test]
fn class_list_operations_roundtrip() -> Result<()> {
    let mut dom = parse_html("<div id='d' class='dot'></div>")?;
    let d = dom.query_selector("#d")?.expect("div");

    assert!(dom.class_contains(d, "dot")?);
    dom.class_add(d, "active")?;
    assert_eq!(dom.attr(d, "class").as_deref(), Some("dot active"));
    dom.class_add(d, "active")?;
    assert_eq!(dom.attr(d, "class").as_deref(), Some("dot active"));
    dom.class_toggle(d, "active", false)?;
    assert_eq!(dom.attr(d, "class").as_deref(), Some("dot"));
    dom.class_remove(d, "dot")?;
    assert_eq!(dom.attr(d, "class"), None);
    Ok(())
}

#[test]
fn style_updates_preserve_other_declarations() -> Result<()> {
    let mut dom = parse_html("<div id='d' style='color: red; display: none'></div>")?;
    let d = dom.query_selector("#d")?.expect("div");

    assert_eq!(dom.style_get(d, "display").as_deref(), Some("none"));
    dom.style_set(d, "display", "block")?;
    assert_eq!(
        dom.attr(d, "style").as_deref(),
        Some("color: red; display: block")
    );
    Ok(())
}

#[test]
fn visibility_respects_ancestors_and_hidden_attribute() -> Result<()> {
    let dom = parse_html(
        r#"
        <div style='display: none'><span id='inside'>x</span></div>
        <span id='outside'>y</span>
        <span id='flagged' hidden>z</span>
        "#,
    )?;

    assert!(!dom.is_visible(dom.query_selector("#inside")?.expect("inside")));
    assert!(dom.is_visible(dom.query_selector("#outside")?.expect("outside")));
    assert!(!dom.is_visible(dom.query_selector("#flagged")?.expect("flagged")));
    Ok(())
}

#[test]
fn set_text_content_replaces_children_and_unindexes_ids() -> Result<()> {
    let mut dom = parse_html("<div id='host'><span id='old'>gone</span></div>")?;
    let host = dom.query_selector("#host")?.expect("host");

    dom.set_text_content(host, "fresh")?;
    assert_eq!(dom.text_content(host), "fresh");
    assert!(dom.query_selector("#old")?.is_none());
    Ok(())
}

#[test]
fn selector_combinators_and_groups_match() -> Result<()> {
    let dom = parse_html(
        r#"
        <section class='carousel'>
          <div class='slide featured' data-rank='1'><p id='deep'>text</p></div>
          <div class='slide'></div>
        </section>
        <div class='slide' id='stray'></div>
        "#,
    )?;

    assert_eq!(dom.query_selector_all(".carousel .slide")?.len(), 2);
    assert_eq!(dom.query_selector_all(".carousel > .slide")?.len(), 2);
    assert_eq!(dom.query_selector_all("section p")?.len(), 1);
    assert_eq!(dom.query_selector_all("section > p")?.len(), 0);
    assert_eq!(dom.query_selector_all("div.slide.featured")?.len(), 1);
    assert_eq!(dom.query_selector_all("[data-rank]")?.len(), 1);
    assert_eq!(dom.query_selector_all("[data-rank=1]")?.len(), 1);
    assert_eq!(dom.query_selector_all("[data-rank='2']")?.len(), 0);
    assert_eq!(dom.query_selector_all("#stray, .featured, missing")?.len(), 2);
    assert_eq!(dom.query_selector_all("*")?.len(), 5);

    let deep = dom.query_selector("#deep")?.expect("deep");
    assert!(dom.matches_selector(deep, ".carousel p")?);
    assert!(!dom.matches_selector(deep, ".slide > section p")?);
    Ok(())
}

#[test]
fn scoped_queries_only_see_descendants() -> Result<()> {
    let dom = parse_html(
        r#"
        <div id='scope' class='box'><span class='x'></span></div>
        <span class='x' id='outside'></span>
        "#,
    )?;

    let scope = dom.query_selector("#scope")?.expect("scope");
    assert_eq!(dom.query_selector_all_from(scope, ".x")?.len(), 1);
    // The scope element itself is not a candidate.
    assert_eq!(dom.query_selector_all_from(scope, ".box")?.len(), 0);
    Ok(())
}

#[test]
fn unsupported_selectors_are_rejected() {
    let dom = parse_html("<div></div>").unwrap();
    for selector in ["p:first-child", "div >", "", " , p", "a ~ b", "[unclosed"] {
        let err = dom.query_selector(selector).unwrap_err();
        assert!(
            matches!(err, Error::UnsupportedSelector(_)),
            "selector {selector:?} should be unsupported"
        );
    }
}

#[test]
fn duplicate_ids_resolve_to_first_in_document_order() -> Result<()> {
    let dom = parse_html("<i id='dup' data-pos='a'></i><i id='dup' data-pos='b'></i>")?;
    let hit = dom.query_selector("#dup")?.expect("dup");
    assert_eq!(dom.attr(hit, "data-pos").as_deref(), Some("a"));
    Ok(())
}

#[test]
fn remove_attr_clears_entries() -> Result<()> {
    let mut dom = parse_html("<div id='d' data-x='1'></div>")?;
    let d = dom.query_selector("#d")?.expect("div");

    dom.remove_attr(d, "data-x")?;
    assert_eq!(dom.attr(d, "data-x"), None);
    Ok(())
}

#[test]
fn node_snippet_renders_tag_attrs_and_text() -> Result<()> {
    let dom = parse_html("<p id='p' class='note'>hello</p>")?;
    let p = dom.query_selector("#p")?.expect("p");
    let snippet = dom.node_snippet(p);

    assert!(snippet.starts_with("<p"));
    assert!(snippet.contains("class=\"note\""));
    assert!(snippet.contains("hello"));
    assert!(snippet.ends_with("</p>"));
    Ok(())
}
