use crate::{render::LayoutRenderer, Layout, LayoutCell};
use svg::{
    node::{
        element::{Group, Polygon, Text},
        Comment,
    },
    Document,
};

/// Render a layout as an SVG. This will be a 2D top-down rendering, with each
/// cell colored by the shape it came from.
pub fn layout_to_svg(layout: &Layout, renderer: &LayoutRenderer) -> Document {
    // Fit the view box around every cell center, plus enough room for the
    // outermost cells' vertices
    let margin = LayoutRenderer::CELL_VERTEX_RADIUS
        * renderer.render_config().scale
        + renderer.render_config().stroke_width;
    let (mut min_x, mut min_y, mut max_x, mut max_y) =
        (0.0f64, 0.0f64, 0.0f64, 0.0f64);
    for coordinate in layout.coordinates() {
        let pos = renderer.cell_position(coordinate);
        min_x = min_x.min(pos.x);
        min_y = min_y.min(pos.y);
        max_x = max_x.max(pos.x);
        max_y = max_y.max(pos.y);
    }

    let mut document = Document::new()
        .set(
            "viewBox",
            (
                // Top-left corner
                (min_x - margin).floor(),
                (min_y - margin).floor(),
                // Width and height
                (max_x - min_x + margin * 2.0).ceil(),
                (max_y - min_y + margin * 2.0).ceil(),
            ),
        )
        .add(Comment::new(format!("\n{:#?}\n", layout.config())));

    for cell in layout.cells() {
        document = document.add(draw_cell(renderer, cell));
    }

    document
}

/// Generate an SVG group for a single cell
fn draw_cell(renderer: &LayoutRenderer, cell: &LayoutCell) -> Group {
    let config = renderer.render_config();
    let pos = renderer.cell_position(cell.coordinate);

    let mut polygon = Polygon::new()
        .set(
            "points",
            renderer
                .cell_vertices()
                .into_iter()
                .map(|vertex| (vertex.x, vertex.y))
                .collect::<Vec<_>>(),
        )
        .set("fill", renderer.cell_color(cell).to_html());
    if config.stroke_width > 0.0 {
        polygon = polygon
            .set("stroke", "#000000")
            .set("stroke-width", config.stroke_width);
    }

    let mut group = Group::new()
        .set("transform", format!("translate({} {})", pos.x, pos.y))
        .add(Comment::new(cell.coordinate.to_string())) // Readability!
        .add(polygon);

    if config.show_coordinates {
        group = group.add(
            Text::new()
                .set("text-anchor", "middle")
                .set("dominant-baseline", "middle")
                .set("font-size", config.scale * 0.25)
                .add(svg::node::Text::new(cell.coordinate.to_string())),
        );
    }

    group
}
