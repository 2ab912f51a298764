use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

// The match page carries two independent headings per team: the shared title
// heading (id "page-title nowrap", abbreviated names, both teams) and one
// lineup heading per team (id "page-title", fuller names). Sections holding a
// team's tables are structural siblings of its lineup heading.
static SEL_TITLE_HEADING: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"h1[id="page-title nowrap"]"#).expect("selector"));
static SEL_TITLE_TEAM_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"a[href*="/team/"]"#).expect("selector"));
static SEL_LINEUP_HEADING: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"h1[id="page-title"]"#).expect("selector"));
static SEL_LINEUP_TEAM_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"a[href^="/team/"]"#).expect("selector"));
static SEL_META_DESCRIPTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"meta[name="description"]"#).expect("selector"));
static SEL_INFO_DIV: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.align-center.col-expand").expect("selector"));
static SEL_MATCHDAY_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"a[href*="matchday"]"#).expect("selector"));
static SEL_REFEREE_LINK: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"a[href*="/referee/"]"#).expect("selector"));
static SEL_EVENTS_SECTION: Lazy<Selector> =
    Lazy::new(|| Selector::parse("section#match-events").expect("selector"));
static SEL_TBODY_ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tbody tr").expect("selector"));
static SEL_CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("selector"));
static SEL_IMG: Lazy<Selector> = Lazy::new(|| Selector::parse("img").expect("selector"));
static SEL_ANY_LINK: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("selector"));

static FOOTBALLER_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/footballer/(\d+)").expect("regex"));
static REFEREE_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/referee/(\d+)").expect("regex"));
static DATE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4}-\d{2}-\d{2}").expect("regex"));
static TIME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{2}:\d{2}").expect("regex"));

/// Structural failures that abort extraction of a single page. Anything less
/// (missing score, date, referee, events table, lineup heading) degrades to
/// `None` or an empty sequence and the record is still produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("no title heading with team profile links")]
    MissingTitle,
    #[error("fewer than two team links in the title heading")]
    MissingTeamLinks,
}

/// One match page, fully materialized in a single pass.
///
/// Lineups are keyed by side rather than by team name: the source markup
/// does not guard against both teams resolving to the same display name,
/// which a name-keyed map would silently merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub home_team: String,
    pub away_team: String,
    pub home_score: Option<String>,
    pub away_score: Option<String>,
    /// `"{date} {time}"`; present only when both halves parsed.
    pub match_datetime: Option<String>,
    pub referee: Option<String>,
    pub referee_id: Option<String>,
    /// Document order of the event rows, chronological by construction.
    pub goals: Vec<GoalEvent>,
    pub home_lineup: TeamLineup,
    pub away_lineup: TeamLineup,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GoalKind {
    Goal,
    Head,
    Penalty,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalEvent {
    /// Minute with trailing apostrophe, e.g. `45'`.
    pub time: String,
    /// Always one of the record's two team names.
    pub team: String,
    pub scorer: Option<String>,
    pub scorer_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: GoalKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assisted_by: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assisted_by_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamLineup {
    /// Display name, duplicated from the record's side field.
    pub team: String,
    pub coach: Option<String>,
    /// The page carries no profile link for the coach.
    pub coach_id: Option<String>,
    pub starters: Vec<Starter>,
    /// Only substitutes that actually entered play; bench players who never
    /// appeared are present in the table but excluded here.
    pub substitutes_played: Vec<Substitute>,
}

impl TeamLineup {
    pub fn empty(team: &str) -> Self {
        Self {
            team: team.to_string(),
            coach: None,
            coach_id: None,
            starters: Vec::new(),
            substitutes_played: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Starter {
    pub number: String,
    pub name: String,
    pub id: Option<String>,
    /// Apostrophe-suffixed minute when substituted off; `None` means the
    /// full match was played.
    pub sub_off_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Substitute {
    pub number: String,
    pub name: String,
    pub id: Option<String>,
    pub sub_on_at: String,
}

struct SideResolution<'a> {
    name: String,
    heading: Option<ElementRef<'a>>,
}

/// Extract one match page into a [`MatchRecord`].
///
/// Fatal only when the title heading or its two team links are missing;
/// every other gap produces a partial record.
pub fn extract_match_record(html: &str) -> Result<MatchRecord, ExtractError> {
    let doc = Html::parse_document(html);

    let title = doc
        .select(&SEL_TITLE_HEADING)
        .next()
        .ok_or(ExtractError::MissingTitle)?;
    let team_links: Vec<ElementRef> = title.select(&SEL_TITLE_TEAM_LINK).collect();
    if team_links.len() < 2 {
        return Err(ExtractError::MissingTeamLinks);
    }

    let home_href = team_links[0].value().attr("href").unwrap_or_default();
    let away_href = team_links[1].value().attr("href").unwrap_or_default();

    // Provisional names from the title heading, overwritten below when a
    // lineup heading resolves to the same team.
    let mut home = SideResolution {
        name: text_of(team_links[0]),
        heading: None,
    };
    let mut away = SideResolution {
        name: text_of(team_links[1]),
        heading: None,
    };

    // A lineup link is a path-prefix of the matching title link: the title
    // href carries a trailing season segment the lineup href omits.
    for candidate in doc.select(&SEL_LINEUP_HEADING) {
        let Some(link) = candidate.select(&SEL_LINEUP_TEAM_LINK).next() else {
            continue;
        };
        let Some(href) = link.value().attr("href") else {
            continue;
        };
        if home_href.starts_with(href) {
            home = SideResolution {
                name: text_of(link),
                heading: Some(candidate),
            };
        } else if away_href.starts_with(href) {
            away = SideResolution {
                name: text_of(link),
                heading: Some(candidate),
            };
        }
    }
    if home.heading.is_none() {
        warn!("home lineup heading not identified, keeping title name '{}'", home.name);
    }
    if away.heading.is_none() {
        warn!("away lineup heading not identified, keeping title name '{}'", away.name);
    }

    let (home_score, away_score) = parse_score(team_links[0]);

    let date = parse_meta_date(&doc);
    let info = doc.select(&SEL_INFO_DIV).next();
    let time = info.and_then(parse_kickoff_time);
    let match_datetime = match (date, time) {
        (Some(date), Some(time)) => Some(format!("{date} {time}")),
        _ => None,
    };

    let (referee, referee_id) = info.map(parse_referee).unwrap_or((None, None));

    let goals = parse_goal_events(&doc, &home.name, &away.name);

    let home_lineup = match home.heading {
        Some(heading) => parse_lineup(heading, &home.name),
        None => TeamLineup::empty(&home.name),
    };
    let away_lineup = match away.heading {
        Some(heading) => parse_lineup(heading, &away.name),
        None => TeamLineup::empty(&away.name),
    };

    Ok(MatchRecord {
        home_team: home.name,
        away_team: away.name,
        home_score,
        away_score,
        match_datetime,
        referee,
        referee_id,
        goals,
        home_lineup,
        away_lineup,
    })
}

/// Score lives in the text node immediately after the first team link in the
/// title heading, as a single `:`-delimited pair. Any other shape yields
/// `None` for both sides.
fn parse_score(first_team_link: ElementRef) -> (Option<String>, Option<String>) {
    let Some(text) = next_text_sibling(first_team_link) else {
        warn!("score text node not found after the first team link");
        return (None, None);
    };
    let parts: Vec<&str> = text.split(':').collect();
    if parts.len() == 2 {
        (
            Some(parts[0].trim().to_string()),
            Some(parts[1].trim().to_string()),
        )
    } else {
        warn!("could not parse score from '{text}'");
        (None, None)
    }
}

fn parse_meta_date(doc: &Html) -> Option<String> {
    let meta = doc.select(&SEL_META_DESCRIPTION).next()?;
    let content = meta.value().attr("content")?;
    DATE_RE.find(content).map(|m| m.as_str().to_string())
}

fn parse_kickoff_time(info: ElementRef) -> Option<String> {
    let link = info.select(&SEL_MATCHDAY_LINK).next()?;
    let text = next_text_sibling(link)?;
    TIME_RE.find(&text).map(|m| m.as_str().to_string())
}

fn parse_referee(info: ElementRef) -> (Option<String>, Option<String>) {
    let Some(link) = info.select(&SEL_REFEREE_LINK).next() else {
        return (None, None);
    };
    let id = link
        .value()
        .attr("href")
        .and_then(|href| REFEREE_ID_RE.captures(href))
        .map(|caps| caps[1].to_string());
    (Some(text_of(link)), id)
}

/// A row of the events table is a goal only if its fourth cell holds an
/// image whose title mentions "goal". The scoring side is whichever of the
/// home (first) / away (fifth) cells is non-empty.
fn parse_goal_events(doc: &Html, home_team: &str, away_team: &str) -> Vec<GoalEvent> {
    let Some(section) = doc.select(&SEL_EVENTS_SECTION).next() else {
        warn!("match events table not found");
        return Vec::new();
    };

    let mut goals = Vec::new();
    for row in section.select(&SEL_TBODY_ROW) {
        let cells: Vec<ElementRef> = row.select(&SEL_CELL).collect();
        if cells.len() < 6 {
            continue;
        }
        let Some(goal_img) = cells[3].select(&SEL_IMG).find(|img| {
            img.value()
                .attr("title")
                .is_some_and(|title| title.to_lowercase().contains("goal"))
        }) else {
            continue;
        };

        let time = format!("{}'", text_of(cells[2]));
        let title = goal_img
            .value()
            .attr("title")
            .unwrap_or_default()
            .to_lowercase();
        let kind = if title.contains("head goal") {
            GoalKind::Head
        } else if title.contains("penalty goal") {
            GoalKind::Penalty
        } else {
            GoalKind::Goal
        };

        let (team, scorer_cell) = if !text_of(cells[0]).is_empty() {
            (home_team, cells[0])
        } else if !text_of(cells[4]).is_empty() {
            (away_team, cells[4])
        } else {
            debug!("goal row with no scorer cell content skipped");
            continue;
        };

        let mut goal = GoalEvent {
            time,
            team: team.to_string(),
            scorer: None,
            scorer_id: None,
            kind,
            assisted_by: None,
            assisted_by_id: None,
        };
        if let Some(link) = scorer_cell.select(&SEL_ANY_LINK).next() {
            goal.scorer = Some(text_of(link));
            goal.scorer_id = link.value().attr("href").and_then(footballer_id);
            if let Some(assist_link) = assist_link_after(link) {
                goal.assisted_by = Some(text_of(assist_link));
                goal.assisted_by_id = assist_link.value().attr("href").and_then(footballer_id);
            }
        }
        goals.push(goal);
    }
    goals
}

/// The assist marker is an image sibling of the scorer link; the assisting
/// player is the first link after that marker.
fn assist_link_after(scorer_link: ElementRef) -> Option<ElementRef> {
    let marker = scorer_link
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| {
            el.value().name() == "img"
                && el
                    .value()
                    .attr("title")
                    .is_some_and(|title| title.trim() == "Assist")
        })?;
    marker
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "a")
}

/// Starters and substitutes tables are the sibling sections following the
/// team's lineup heading, identified by their id prefixes; the coach label
/// hangs off the substitutes section, so without it the coach stays unknown.
fn parse_lineup(heading: ElementRef, team: &str) -> TeamLineup {
    let mut lineup = TeamLineup::empty(team);

    let Some(starters_section) = next_sibling_section_with_prefix(heading, "team-lineup") else {
        warn!("starters section for {team} not found");
        return lineup;
    };
    for row in starters_section.select(&SEL_TBODY_ROW) {
        let cells: Vec<ElementRef> = row.select(&SEL_CELL).collect();
        if cells.len() < 2 {
            continue;
        }
        let number = text_of(cells[0]);
        let (name, id) = player_cell(cells[1]);
        let sub_off_at = cells
            .get(2)
            .map(|cell| text_of(*cell))
            .filter(|text| !text.is_empty() && text.contains('\''))
            .map(|text| normalize_minute(&text));
        lineup.starters.push(Starter {
            number,
            name,
            id,
            sub_off_at,
        });
    }

    let Some(subs_section) = next_sibling_section_with_prefix(starters_section, "tmlnps") else {
        warn!("substitutes section for {team} not found, cannot find coach");
        return lineup;
    };
    for row in subs_section.select(&SEL_TBODY_ROW) {
        let cells: Vec<ElementRef> = row.select(&SEL_CELL).collect();
        if cells.len() < 3 {
            continue;
        }
        let minute = text_of(cells[2]);
        if minute.is_empty() || !minute.contains('\'') {
            // Bench player who never entered play.
            continue;
        }
        let number = text_of(cells[0]);
        let (name, id) = player_cell(cells[1]);
        lineup.substitutes_played.push(Substitute {
            number,
            name,
            id,
            sub_on_at: normalize_minute(&minute),
        });
    }

    if let Some(label) = coach_label_after(subs_section) {
        lineup.coach = coach_name_after(label);
    }
    lineup
}

fn next_sibling_section_with_prefix<'a>(
    el: ElementRef<'a>,
    prefix: &str,
) -> Option<ElementRef<'a>> {
    el.next_siblings().filter_map(ElementRef::wrap).find(|sib| {
        sib.value().name() == "section"
            && sib
                .value()
                .attr("id")
                .is_some_and(|id| id.starts_with(prefix))
    })
}

fn coach_label_after(subs_section: ElementRef) -> Option<ElementRef> {
    subs_section
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "b" && text_of(*el).to_lowercase().contains("coach"))
}

/// The coach name is the text node after the bold label, shaped like
/// `" : Moyes "`.
fn coach_name_after(label: ElementRef) -> Option<String> {
    let node = label.next_sibling()?;
    let text = node.value().as_text()?;
    let name = text.trim().trim_start_matches(':').trim();
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

/// Player cells carry the name inside a profile link whose href encodes the
/// id; cells without a link fall back to their own text and no id.
fn player_cell(cell: ElementRef) -> (String, Option<String>) {
    match cell.select(&SEL_ANY_LINK).next() {
        Some(link) => {
            let id = link.value().attr("href").and_then(footballer_id);
            (text_of(link), id)
        }
        None => (text_of(cell), None),
    }
}

fn footballer_id(href: &str) -> Option<String> {
    FOOTBALLER_ID_RE
        .captures(href)
        .map(|caps| caps[1].to_string())
}

/// The minute cell sometimes spells `46 '`; the apostrophe belongs to the
/// number.
fn normalize_minute(text: &str) -> String {
    text.replace(" '", "'")
}

fn text_of(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

fn next_text_sibling(el: ElementRef) -> Option<String> {
    let node = el.next_sibling()?;
    let text = node.value().as_text()?;
    Some(text.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::{footballer_id, normalize_minute};

    #[test]
    fn footballer_id_from_href() {
        assert_eq!(footballer_id("/footballer/12345/"), Some("12345".to_string()));
        assert_eq!(footballer_id("/footballer/12345"), Some("12345".to_string()));
        assert_eq!(footballer_id("/team/West-Ham/"), None);
    }

    #[test]
    fn minute_normalization() {
        assert_eq!(normalize_minute("46 '"), "46'");
        assert_eq!(normalize_minute("90+3'"), "90+3'");
        assert_eq!(normalize_minute("73'"), "73'");
    }
}
