use super::*;

const CAROUSEL_PAGE: &str = r#"
    <section class='carousel'>
      <div class='slide' id='slide-0'>One</div>
      <div class='slide' id='slide-1'>Two</div>
      <div class='slide' id='slide-2'>Three</div>
      <button class='carousel-prev'>Prev</button>
      <button class='carousel-next'>Next</button>
      <div class='carousel-dots'></div>
    </section>
    "#;

fn assert_only_visible(page: &Page, visible: usize) -> Result<()> {
    for slide in 0..3 {
        let selector = format!("#slide-{slide}");
        if slide == visible {
            page.assert_visible(&selector)?;
        } else {
            page.assert_hidden(&selector)?;
        }
    }
    Ok(())
}

#[test]
fn initial_state_shows_first_slide_and_first_dot() -> Result<()> {
    let page = Page::from_html(CAROUSEL_PAGE)?;

    assert_only_visible(&page, 0)?;
    assert_eq!(page.dom.query_selector_all(".carousel-dots .dot")?.len(), 3);
    page.assert_attr("[aria-label=\"Slide 1\"]", "class", "dot active")?;
    page.assert_attr("[aria-label=\"Slide 2\"]", "class", "dot")?;
    page.assert_attr("[aria-label=\"Slide 3\"]", "class", "dot")?;
    Ok(())
}

#[test]
fn next_and_previous_wrap_around() -> Result<()> {
    let mut page = Page::from_html(CAROUSEL_PAGE)?;

    page.click(".carousel-next")?;
    assert_only_visible(&page, 1)?;
    page.click(".carousel-next")?;
    assert_only_visible(&page, 2)?;
    page.click(".carousel-next")?;
    assert_only_visible(&page, 0)?;

    page.click(".carousel-prev")?;
    assert_only_visible(&page, 2)?;
    Ok(())
}

#[test]
fn next_then_previous_returns_to_start() -> Result<()> {
    let mut page = Page::from_html(CAROUSEL_PAGE)?;

    for _ in 0..3 {
        page.click(".carousel-next")?;
        page.click(".carousel-prev")?;
        assert_only_visible(&page, 0)?;
    }
    Ok(())
}

#[test]
fn indicator_click_jumps_directly() -> Result<()> {
    let mut page = Page::from_html(CAROUSEL_PAGE)?;

    page.click("[aria-label=\"Slide 3\"]")?;
    assert_only_visible(&page, 2)?;
    page.assert_attr("[aria-label=\"Slide 3\"]", "class", "dot active")?;
    page.assert_attr("[aria-label=\"Slide 1\"]", "class", "dot")?;

    page.click("[aria-label=\"Slide 2\"]")?;
    assert_only_visible(&page, 1)?;
    page.assert_attr("[aria-label=\"Slide 2\"]", "class", "dot active")?;
    Ok(())
}

#[test]
fn keyboard_arrows_navigate() -> Result<()> {
    let mut page = Page::from_html(CAROUSEL_PAGE)?;

    page.press_key("ArrowRight")?;
    assert_only_visible(&page, 1)?;
    page.press_key("ArrowLeft")?;
    assert_only_visible(&page, 0)?;
    page.press_key("ArrowLeft")?;
    assert_only_visible(&page, 2)?;

    page.press_key("Enter")?;
    assert_only_visible(&page, 2)?;
    Ok(())
}

#[test]
fn carousel_without_dots_container_builds_no_indicators() -> Result<()> {
    let html = r#"
        <section class='carousel'>
          <div class='slide' id='a'>One</div>
          <div class='slide' id='b'>Two</div>
          <button class='carousel-next'>Next</button>
        </section>
        "#;
    let mut page = Page::from_html(html)?;

    assert!(!page.exists(".dot"));
    page.click(".carousel-next")?;
    page.assert_visible("#b")?;
    Ok(())
}

#[test]
fn carousel_without_controls_still_supports_keyboard() -> Result<()> {
    let html = r#"
        <section class='carousel'>
          <div class='slide' id='a'>One</div>
          <div class='slide' id='b'>Two</div>
        </section>
        "#;
    let mut page = Page::from_html(html)?;

    page.press_key("ArrowRight")?;
    page.assert_visible("#b")?;
    page.assert_hidden("#a")?;
    Ok(())
}

#[test]
fn empty_carousel_is_not_mounted() -> Result<()> {
    let html = r#"
        <section class='carousel'>
          <div class='carousel-dots'></div>
        </section>
        "#;
    let page = Page::from_html(html)?;

    assert!(page.pending_timers().is_empty());
    assert!(!page.exists(".dot"));
    Ok(())
}

#[test]
fn single_slide_carousel_wraps_to_itself() -> Result<()> {
    let html = r#"
        <section class='carousel'>
          <div class='slide' id='only'>One</div>
          <button class='carousel-next'>Next</button>
          <button class='carousel-prev'>Prev</button>
        </section>
        "#;
    let mut page = Page::from_html(html)?;

    page.click(".carousel-next")?;
    page.assert_visible("#only")?;
    page.click(".carousel-prev")?;
    page.assert_visible("#only")?;
    Ok(())
}

#[test]
fn two_carousels_are_independent() -> Result<()> {
    let html = r#"
        <section class='carousel' id='hero'>
          <div class='slide' id='hero-0'>A</div>
          <div class='slide' id='hero-1'>B</div>
          <button class='carousel-next' id='hero-next'>Next</button>
        </section>
        <section class='carousel' id='deals'>
          <div class='slide' id='deals-0'>C</div>
          <div class='slide' id='deals-1'>D</div>
          <button class='carousel-next' id='deals-next'>Next</button>
        </section>
        "#;
    let mut page = Page::from_html(html)?;

    assert_eq!(page.pending_timers().len(), 2);

    page.click("#deals-next")?;
    page.assert_visible("#hero-0")?;
    page.assert_visible("#deals-1")?;
    page.assert_hidden("#deals-0")?;
    Ok(())
}

#[test]
fn keyboard_drives_every_mounted_carousel() -> Result<()> {
    let html = r#"
        <section class='carousel'>
          <div class='slide' id='hero-0'>A</div>
          <div class='slide' id='hero-1'>B</div>
        </section>
        <section class='carousel'>
          <div class='slide' id='deals-0'>C</div>
          <div class='slide' id='deals-1'>D</div>
        </section>
        "#;
    let mut page = Page::from_html(html)?;

    page.press_key("ArrowRight")?;
    page.assert_visible("#hero-1")?;
    page.assert_visible("#deals-1")?;
    Ok(())
}

#[test]
fn disabled_control_is_inert() -> Result<()> {
    let html = r#"
        <section class='carousel'>
          <div class='slide' id='a'>One</div>
          <div class='slide' id='b'>Two</div>
          <button class='carousel-next' disabled>Next</button>
        </section>
        "#;
    let mut page = Page::from_html(html)?;

    page.click(".carousel-next")?;
    page.assert_visible("#a")?;
    Ok(())
}
