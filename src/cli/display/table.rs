//! Table rendering for CLI output

use super::{ColorTheme, StatusIcon};
use crate::domain::build::{kind_of, object_images, BuildOutput};
use crate::domain::source::Image;
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Cell, CellAlignment, ContentArrangement, Table};
use kube::ResourceExt;

/// Table renderer for formatted output
pub struct TableRenderer {
    theme: ColorTheme,
}

impl Default for TableRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TableRenderer {
    /// Create a new table renderer with default theme
    pub fn new() -> Self {
        Self {
            theme: ColorTheme::default(),
        }
    }

    /// Render build output as a table of objects followed by the images
    pub fn render_build_output(&self, output: &BuildOutput) -> String {
        if output.is_empty() {
            return format!(
                "{} kustomize build produced no objects",
                StatusIcon::WARNING.yellow()
            );
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("KIND").set_alignment(CellAlignment::Left),
                Cell::new("NAME").set_alignment(CellAlignment::Left),
                Cell::new("NAMESPACE").set_alignment(CellAlignment::Left),
                Cell::new("IMAGES").set_alignment(CellAlignment::Left),
            ]);

        for object in &output.objects {
            let kind = kind_of(object);
            let images = object_images(object)
                .iter()
                .map(Image::as_str)
                .collect::<Vec<_>>()
                .join("\n");

            table.add_row(vec![
                Cell::new(kind).fg(self.theme.get_kind_color(kind)),
                Cell::new(object.name_any()),
                Cell::new(object.namespace().unwrap_or_else(|| "-".to_string()))
                    .fg(self.theme.muted),
                Cell::new(images),
            ]);
        }

        let mut rendered = String::new();
        rendered.push_str(&format!(
            "╭─ Build Output {} ─╮\n",
            format!("[{} objects]", output.len()).bright_black()
        ));
        rendered.push_str(&table.to_string());
        rendered.push('\n');
        rendered.push_str(&format!(
            "{} {} objects, {} images\n",
            StatusIcon::get_build_icon(output.len()).green(),
            output.len(),
            output.images.len()
        ));

        rendered
    }

    /// Render images split into name, tag and digest
    pub fn render_images(&self, images: &[Image]) -> String {
        if images.is_empty() {
            return "No images found".to_string();
        }

        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec!["IMAGE", "NAME", "TAG", "DIGEST"]);

        for image in images {
            table.add_row(vec![
                Cell::new(image.as_str()),
                Cell::new(image.name()),
                Cell::new(image.tag().unwrap_or("-")),
                Cell::new(image.digest().unwrap_or("-")).fg(self.theme.muted),
            ]);
        }

        table.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::build::parse_output;

    #[test]
    fn test_render_empty_output() {
        let renderer = TableRenderer::new();
        let rendered = renderer.render_build_output(&BuildOutput::default());
        assert!(rendered.contains("produced no objects"));
    }

    #[test]
    fn test_render_objects() {
        let yaml = "apiVersion: apps/v1\nkind: Deployment\nmetadata:\n  name: web\n  namespace: prod\nspec:\n  template:\n    spec:\n      containers:\n      - name: web\n        image: nginx:1.15.5\n";
        let output = parse_output(yaml.as_bytes()).unwrap();

        let rendered = TableRenderer::new().render_build_output(&output);
        assert!(rendered.contains("Deployment"));
        assert!(rendered.contains("web"));
        assert!(rendered.contains("prod"));
        assert!(rendered.contains("nginx:1.15.5"));
    }

    #[test]
    fn test_render_images() {
        let renderer = TableRenderer::new();
        assert_eq!(renderer.render_images(&[]), "No images found");

        let rendered = renderer.render_images(&[Image::new("nginx:1.15.5")]);
        assert!(rendered.contains("nginx"));
        assert!(rendered.contains("1.15.5"));
    }
}
