//! Turns an analysis payload into a styled breakdown.
//!
//! `layout` is pure and holds all of the classification rules; `view` only
//! draws what `layout` produced.

use iced::widget::{column, container, row, text, Column};
use iced::{alignment, Element, Length, Padding};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::api::AnalysisResult;
use crate::theme;

const HEADING_MAX_CHARS: usize = 50;

static NUMBERED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+\.\s").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(String),
    /// `lead` marks the opening paragraph of a section.
    Paragraph { text: String, lead: bool },
    Bullet(String),
    Numbered(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: &'static str,
    pub blocks: Vec<Block>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultView {
    pub artist: Option<String>,
    pub sections: Vec<Section>,
    pub data_points: Option<u64>,
}

impl ResultView {
    pub fn is_empty(&self) -> bool {
        self.artist.is_none() && self.sections.is_empty() && self.data_points.is_none()
    }
}

pub fn layout(result: &AnalysisResult) -> ResultView {
    let artist = result
        .top_artist_name
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string);

    let narratives = [
        ("Artist Journey", &result.most_similar_artist_journey_outline),
        ("Feedback & Tips", &result.artwork_feedback_and_tips),
        ("Recommended Next Steps", &result.recommended_next_steps),
    ];

    let sections = narratives
        .into_iter()
        .filter_map(|(title, body)| {
            let blocks = classify(body.as_deref()?);
            (!blocks.is_empty()).then_some(Section { title, blocks })
        })
        .collect();

    ResultView {
        artist,
        sections,
        data_points: result.chunks_used.filter(|n| *n > 0),
    }
}

/// Splits a narrative on line breaks and classifies each non-blank line.
///
/// Bullets and numbered items always win over the heading heuristic.
pub fn classify(narrative: &str) -> Vec<Block> {
    narrative
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(index, line)| classify_line(line, index == 0))
        .collect()
}

fn classify_line(line: &str, first: bool) -> Block {
    if let Some(rest) = line.strip_prefix('-').or_else(|| line.strip_prefix('•')) {
        return Block::Bullet(rest.trim().to_string());
    }

    if NUMBERED_ITEM.is_match(line) {
        return Block::Numbered(line.to_string());
    }

    if !first && looks_like_heading(line) {
        return Block::Heading(line.to_string());
    }

    Block::Paragraph {
        text: line.to_string(),
        lead: first,
    }
}

fn looks_like_heading(line: &str) -> bool {
    line.chars().count() < HEADING_MAX_CHARS && !line.ends_with(['.', ',', ':', ';'])
}

pub fn view<'a, Message: 'a>(result: &'a ResultView) -> Element<'a, Message> {
    let mut content = Column::new().spacing(24);

    if let Some(artist) = &result.artist {
        content = content.push(artist_header(artist));
    }

    for section in &result.sections {
        content = content.push(section_card(section));
    }

    if let Some(points) = result.data_points {
        content = content.push(
            container(
                text(format!("Analysis based on {} data points", points))
                    .size(12)
                    .color(theme::TEXT_MUTED),
            )
            .width(Length::Fill)
            .align_x(alignment::Horizontal::Center),
        );
    }

    content.into()
}

fn artist_header<'a, Message: 'a>(artist: &'a str) -> Element<'a, Message> {
    container(
        column![
            text("ARTIST MATCH").size(12).font(theme::MEDIUM).color(theme::TEXT_MUTED),
            text(artist).size(28).font(theme::SEMIBOLD),
            text("Your artwork shares similarities with this established artist's style and techniques")
                .size(14)
                .color(theme::TEXT_MUTED),
        ]
        .spacing(6),
    )
    .padding(24)
    .width(Length::Fill)
    .style(theme::artist_card)
    .into()
}

fn section_card<'a, Message: 'a>(section: &'a Section) -> Element<'a, Message> {
    let header = container(
        text(section.title.to_uppercase())
            .size(12)
            .font(theme::SEMIBOLD),
    )
    .padding(16)
    .width(Length::Fill);

    let divider = container(column![])
        .width(Length::Fill)
        .height(1)
        .style(theme::divider);

    let body = section
        .blocks
        .iter()
        .fold(Column::new().spacing(12), |col, block| col.push(block_view(block)));

    container(column![header, divider, container(body).padding(24)])
        .width(Length::Fill)
        .style(theme::paper)
        .into()
}

fn block_view<'a, Message: 'a>(block: &'a Block) -> Element<'a, Message> {
    match block {
        Block::Heading(heading) => container(text(heading).size(16).font(theme::SEMIBOLD))
            .padding(Padding { top: 12.0, ..Padding::ZERO })
            .into(),
        Block::Paragraph { text: body, lead } => {
            let line = text(body).size(16);
            if *lead {
                line.font(theme::MEDIUM).color(theme::TEXT).into()
            } else {
                line.color(theme::TEXT_MUTED).into()
            }
        }
        Block::Bullet(item) => row![
            text("•").size(16).font(theme::MEDIUM).color(theme::PRIMARY),
            text(item).size(16).color(theme::TEXT_MUTED),
        ]
        .spacing(12)
        .padding(Padding { left: 8.0, ..Padding::ZERO })
        .into(),
        Block::Numbered(item) => container(text(item).size(16).color(theme::TEXT_MUTED))
            .padding(Padding { left: 8.0, ..Padding::ZERO })
            .into(),
    }
}
