use std::{fs::File, io::Write};

use graphviz_rust::{
    cmd::Format,
    dot_generator::{attr, edge, graph, id, node, node_id, stmt},
    dot_structures::*,
    printer::{DotPrinter, PrinterContext},
};
use itertools::Itertools;

use crate::core::PetriNet;

///
/// Render a [`PetriNet`] with graphviz and write the image bytes to `writer`
///
pub fn export_petri_net_image_to_writer<W: Write>(
    net: &PetriNet,
    mut writer: W,
    format: Format,
    dpi_factor: Option<f32>,
) -> Result<(), std::io::Error> {
    let g = export_petri_net_to_dot_graph(net, dpi_factor);
    let out = graphviz_rust::exec(g, &mut PrinterContext::default(), vec![format.into()])?;
    writer.write_all(&out)
}

///
/// Export the image of a [`PetriNet`]
///
/// Also see [`export_petri_net_image_svg`] and [`export_petri_net_image_png`]
///
pub fn export_petri_net_image<P: AsRef<std::path::Path>>(
    net: &PetriNet,
    path: P,
    format: Format,
    dpi_factor: Option<f32>,
) -> Result<(), std::io::Error> {
    let f = File::create(path)?;
    export_petri_net_image_to_writer(net, f, format, dpi_factor)
}

///
/// Export the a [`PetriNet`] to a DOT graph (used in Graphviz)
///
/// Places are drawn as circles labeled with their label (the initially marked place also shows a token),
/// final places as double circles.
///
pub fn export_petri_net_to_dot_graph(net: &PetriNet, dpi_factor: Option<f32>) -> Graph {
    let place_nodes: Vec<_> = net
        .places
        .iter()
        .sorted_by_key(|(p_id, _)| **p_id)
        .map(|(p_id, p)| {
            let label = p.label.clone().unwrap_or_default();
            let symbol = if net.is_in_initial_marking(&p.into()) {
                "●"
            } else {
                ""
            };
            let shape = if net.is_in_a_final_marking(&p.into()) {"doublecircle"} else {"circle"};
            let size = if net.is_in_a_final_marking(&p.into()) {0.4} else {0.5};
            stmt!(node!(esc p_id; attr!("label", esc symbol), attr!("xlabel", esc label), attr!("shape",shape), attr!("fixedsize",true), attr!("width",size), attr!("height",size)))
        }).collect();

    let transition_nodes: Vec<_> = net
        .transitions
        .iter()
        .sorted_by_key(|(t_id, _)| **t_id)
        .map(|(t_id, t)| {
            let label = t.label.as_ref().cloned().unwrap_or_default();
            let (font_size,width) = (12,1);
            let fill_color = if t.label.is_none() { "black" } else { "white" };
            stmt!(node!(esc t_id; attr!("label", esc label), attr!("shape","box"), attr!("fontsize",font_size),attr!("style","filled"), attr!("fillcolor",fill_color), attr!("width",width), attr!("height",0.5)))
        }).collect();

    let arcs: Vec<_> = net
        .arcs
        .iter()
        .sorted()
        .map(|arc| {
            let (from_id, to_id) = arc.from_to.source_target();
            let attrs = if arc.weight == 1 {
                Vec::default()
            } else {
                vec![attr!("label", (format!("{}", arc.weight)))]
            };
            stmt!(edge!(node_id!(esc from_id) => node_id!(esc to_id), attrs))
        })
        .collect();

    let mut global_graph_options = vec![stmt!(attr!("rankdir", "LR"))];
    if let Some(dpi_fac) = dpi_factor {
        global_graph_options.push(stmt!(attr!("dpi", (dpi_fac * 96.0))))
    }

    graph!(strict di id!("alpha_net"),vec![global_graph_options,place_nodes,transition_nodes, arcs].into_iter().flatten().collect())
}

///
/// Convert a DOT graph to a String containing the DOT source
///
pub fn graph_to_dot(g: &Graph) -> String {
    g.print(&mut PrinterContext::default())
}

///
/// Export the image of a [`PetriNet`] as a SVG file
///
/// Also consider using [`PetriNet::export_svg`] for convenience.
pub fn export_petri_net_image_svg<P: AsRef<std::path::Path>>(
    net: &PetriNet,
    path: P,
) -> Result<(), std::io::Error> {
    export_petri_net_image(net, path, Format::Svg, None)
}

///
/// Export the image of a [`PetriNet`] as a PNG file
///
/// Also consider using [`PetriNet::export_png`] for convenience.
pub fn export_petri_net_image_png<P: AsRef<std::path::Path>>(
    net: &PetriNet,
    path: P,
) -> Result<(), std::io::Error> {
    export_petri_net_image(net, path, Format::Png, Some(2.0))
}
