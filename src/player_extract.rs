use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

static SEL_NAME_HEADING: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"h1[id="page-title"]"#).expect("selector"));
static SEL_CAKE_ICON: Lazy<Selector> =
    Lazy::new(|| Selector::parse("i.fa-cake-candles").expect("selector"));
static SEL_RULER_ICON: Lazy<Selector> =
    Lazy::new(|| Selector::parse("i.fa-ruler-vertical").expect("selector"));
static SEL_JSON_LD: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"script[type="application/ld+json"]"#).expect("selector"));
static SEL_STYLE_FONT: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r##"font[color="#1111FF"]"##).expect("selector"));
static SEL_CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("selector"));

/// One player profile page. Unlike match pages there is no structural
/// prerequisite: every field is tolerated-absent, so extraction never fails.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    /// Player code, supplied by the caller from the page's file name.
    pub id: String,
    pub short_name: Option<String>,
    pub full_name: Option<String>,
    pub date_of_birth: Option<String>,
    pub height: Option<String>,
    pub nationality: Option<String>,
    pub play_style: Option<String>,
}

pub fn extract_player_record(html: &str, code: &str) -> PlayerRecord {
    let doc = Html::parse_document(html);

    let heading = doc.select(&SEL_NAME_HEADING).next();
    let short_name = heading.map(text_of).filter(|name| !name.is_empty());
    // The full legal name is the bare text node right after the heading.
    let full_name = heading
        .and_then(next_text_sibling)
        .filter(|name| !name.is_empty());

    // Birth date and height rows are identified by their icons; the value
    // sits in the second cell of the enclosing row. The birth date cell
    // appends the age in parentheses.
    let date_of_birth = icon_row_value(&doc, &SEL_CAKE_ICON)
        .map(|text| text.split('(').next().unwrap_or("").trim().to_string())
        .filter(|text| !text.is_empty());
    let height = icon_row_value(&doc, &SEL_RULER_ICON).filter(|text| !text.is_empty());

    let nationality = json_ld_nationality(&doc);

    let play_style = doc
        .select(&SEL_STYLE_FONT)
        .next()
        .map(text_of)
        .filter(|text| !text.is_empty());

    PlayerRecord {
        id: code.to_string(),
        short_name,
        full_name,
        date_of_birth,
        height,
        nationality,
        play_style,
    }
}

fn icon_row_value(doc: &Html, icon_selector: &Selector) -> Option<String> {
    let icon = doc.select(icon_selector).next()?;
    let row = icon
        .ancestors()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "tr")?;
    let cell = row.select(&SEL_CELL).nth(1)?;
    Some(text_of(cell))
}

/// Nationality comes from the structured metadata block rather than the
/// visible markup, which only shows a flag image.
fn json_ld_nationality(doc: &Html) -> Option<String> {
    let script = doc.select(&SEL_JSON_LD).next()?;
    let raw = script.text().collect::<String>();
    let value: serde_json::Value = serde_json::from_str(raw.trim()).ok()?;
    value
        .get("nationality")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}

fn text_of(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn next_text_sibling(el: ElementRef) -> Option<String> {
    let node = el.next_sibling()?;
    let text = node.value().as_text()?;
    Some(text.trim().to_string())
}
