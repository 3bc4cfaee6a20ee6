//! Render command for laying out a timeline document.
//!
//! Prints either a text summary of the scene or the draw commands the
//! default drawer issues for it.

use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tl_core::{
    Appearance, DefaultDrawer, MemoryDb, RecordingTarget, Scene, StripData, TimeType, TimelineDb,
    ViewProperties, approximate_text_size,
};

use super::util::parse_period;
use crate::Config;
use crate::document::{Document, fit_all_events};

/// Canvas and period options for a render.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions<'a> {
    pub start: Option<&'a str>,
    pub end: Option<&'a str>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}

/// A laid out document, kept together with what produced it.
pub struct Rendered {
    pub db: MemoryDb,
    pub view: ViewProperties,
    pub scene: Scene,
}

pub fn render(db: MemoryDb, options: &RenderOptions<'_>, config: &Config) -> Result<Rendered> {
    let time_type = db.time_type();
    let period = match (options.start, options.end) {
        (Some(start), Some(end)) => parse_period(time_type, start, end)?,
        _ => fit_all_events(&db)?,
    };
    let view = ViewProperties::new(period);
    let size = (
        options.width.unwrap_or(config.width),
        options.height.unwrap_or(config.height),
    );
    let scene = Scene::create(size, &db, &view, &approximate_text_size, &config.appearance);
    Ok(Rendered { db, view, scene })
}

/// Text summary of a scene.
pub fn format_scene(scene: &Scene, time_type: TimeType) -> String {
    let mut output = String::new();
    writeln!(
        output,
        "Period: {}",
        time_type.format_period(scene.metrics().period())
    )
    .unwrap();
    writeln!(
        output,
        "Canvas: {}x{}, divider at {}",
        scene.width(),
        scene.height(),
        scene.divider_y()
    )
    .unwrap();
    let labels = |data: &[StripData]| {
        data.iter()
            .map(|strip| strip.label.as_str())
            .filter(|label| !label.is_empty())
            .collect::<Vec<_>>()
            .join(" | ")
    };
    writeln!(output, "Major strips: {}", labels(scene.major_strip_data())).unwrap();
    writeln!(output, "Minor strips: {}", labels(scene.minor_strip_data())).unwrap();

    if scene.event_data().is_empty() {
        writeln!(output, "No events in view.").unwrap();
    } else {
        writeln!(output, "Events:").unwrap();
        for (event, rect) in scene.event_data() {
            let kind = if rect.y >= scene.divider_y() {
                "period"
            } else {
                "point"
            };
            writeln!(
                output,
                "  {} ({kind}) at ({}, {}) size {}x{}",
                event.text, rect.x, rect.y, rect.width, rect.height
            )
            .unwrap();
        }
    }
    if scene.hidden_event_count() > 0 {
        writeln!(output, "Hidden events: {}", scene.hidden_event_count()).unwrap();
    }
    output
}

/// Draw commands for a rendered document as pretty JSON.
pub fn format_draw_commands(rendered: &Rendered, appearance: &Appearance) -> Result<String> {
    let mut target = RecordingTarget::new();
    DefaultDrawer::new(appearance, &approximate_text_size).draw(
        &mut target,
        &rendered.scene,
        &rendered.view,
        &rendered.db.get_categories(),
    );
    serde_json::to_string_pretty(&target).context("failed to serialize draw commands")
}

pub fn run(path: &Path, options: &RenderOptions<'_>, json: bool, config: &Config) -> Result<()> {
    let db = Document::load(path)?
        .into_db(config.calendar)
        .with_context(|| format!("invalid document {}", path.display()))?;
    let time_type = db.time_type();
    let rendered = render(db, options, config)?;
    tracing::debug!(
        events = rendered.scene.event_data().len(),
        hidden = rendered.scene.hidden_event_count(),
        "rendered document"
    );

    if json {
        println!("{}", format_draw_commands(&rendered, &config.appearance)?);
    } else {
        print!("{}", format_scene(&rendered.scene, time_type));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numeric_db() -> MemoryDb {
        serde_json::from_str::<Document>(
            r#"{
                "calendar": "numeric",
                "events": [
                    {"start": "20", "end": "40", "text": "span"},
                    {"start": "70", "text": "point"}
                ]
            }"#,
        )
        .unwrap()
        .into_db(TimeType::Numeric)
        .unwrap()
    }

    fn options() -> RenderOptions<'static> {
        RenderOptions {
            start: Some("0"),
            end: Some("100"),
            ..RenderOptions::default()
        }
    }

    #[test]
    fn test_format_scene() {
        let rendered = render(numeric_db(), &options(), &Config::default()).unwrap();
        insta::assert_snapshot!(format_scene(&rendered.scene, TimeType::Numeric), @r"
        Period: 0 to 100
        Canvas: 1000x400, divider at 200
        Major strips: 0
        Minor strips: 0 | 10 | 20 | 30 | 40 | 50 | 60 | 70 | 80 | 90
        Events:
          span (period) at (200, 220) size 201x18
          point (point) at (680, 162) size 41x18
        ");
    }

    #[test]
    fn test_canvas_size_overrides_config() {
        let options = RenderOptions {
            width: Some(500),
            height: Some(100),
            ..options()
        };
        let rendered = render(numeric_db(), &options, &Config::default()).unwrap();
        assert_eq!(rendered.scene.width(), 500);
        assert_eq!(rendered.scene.divider_y(), 50);
    }

    #[test]
    fn test_draw_commands_are_json() {
        let rendered = render(numeric_db(), &options(), &Config::default()).unwrap();
        let json = format_draw_commands(&rendered, &Appearance::default()).unwrap();
        let commands: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(commands[0]["kind"], "fill_rect");
        assert!(
            commands
                .iter()
                .any(|command| command["kind"] == "text" && command["text"] == "span")
        );
    }

    #[test]
    fn test_empty_document_uses_default_period() {
        let db = MemoryDb::new(TimeType::Numeric);
        let rendered = render(db, &RenderOptions::default(), &Config::default()).unwrap();
        let output = format_scene(&rendered.scene, TimeType::Numeric);
        assert!(output.starts_with("Period: -50 to 50\n"));
        assert!(output.contains("No events in view."));
    }
}
