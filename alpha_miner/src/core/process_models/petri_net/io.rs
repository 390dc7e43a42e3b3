//! IO implementations for [`PetriNet`]

use std::io::{Read, Write};

use crate::core::io::{Exportable, ExtensionWithMime, Importable};
use crate::core::process_models::petri_net::pnml::export_petri_net_to_pnml;
use crate::core::process_models::petri_net::PetriNet;

/// Error type for [`PetriNet`] IO operations
#[derive(Debug, thiserror::Error)]
pub enum PetriNetIOError {
    /// IO Error
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),
    /// XML Error
    #[error("XML Error: {0}")]
    Xml(#[from] quick_xml::Error),
    /// JSON Error
    #[error("JSON Error: {0}")]
    Json(#[from] serde_json::Error),
    /// Unsupported Format
    #[error("Unsupported Format: {0}")]
    UnsupportedFormat(String),
}

impl Importable for PetriNet {
    type Error = PetriNetIOError;

    fn import_from_reader<R: Read>(reader: R, format: &str) -> Result<Self, Self::Error> {
        if format.ends_with("json") {
            Ok(serde_json::from_reader(reader)?)
        } else {
            Err(PetriNetIOError::UnsupportedFormat(format.to_string()))
        }
    }

    fn known_import_formats() -> Vec<ExtensionWithMime> {
        vec![ExtensionWithMime::new("json", "application/json")]
    }
}

impl Exportable for PetriNet {
    type Error = PetriNetIOError;

    fn export_to_writer<W: Write>(&self, writer: W, format: &str) -> Result<(), Self::Error> {
        match format {
            _ if format.ends_with("pnml") => {
                let mut xml_writer = quick_xml::Writer::new_with_indent(writer, b' ', 4);
                export_petri_net_to_pnml(self, &mut xml_writer)?;
                Ok(())
            }
            _ if format.ends_with("json") => {
                serde_json::to_writer_pretty(writer, self)?;
                Ok(())
            }
            #[cfg(feature = "graphviz-export")]
            _ if format.ends_with("dot") => {
                let mut writer = writer;
                let g = super::image_export::export_petri_net_to_dot_graph(self, None);
                writer.write_all(super::image_export::graph_to_dot(&g).as_bytes())?;
                Ok(())
            }
            #[cfg(feature = "graphviz-export")]
            _ if format.ends_with("svg") || format.ends_with("png") => {
                let image_format = if format.ends_with("svg") {
                    graphviz_rust::cmd::Format::Svg
                } else {
                    graphviz_rust::cmd::Format::Png
                };
                super::image_export::export_petri_net_image_to_writer(
                    self,
                    writer,
                    image_format,
                    None,
                )?;
                Ok(())
            }
            _ => Err(PetriNetIOError::UnsupportedFormat(format.to_string())),
        }
    }

    fn known_export_formats() -> Vec<ExtensionWithMime> {
        #[allow(unused_mut)]
        let mut formats = vec![
            ExtensionWithMime::new("pnml", "application/xml"),
            ExtensionWithMime::new("json", "application/json"),
        ];
        #[cfg(feature = "graphviz-export")]
        formats.extend([
            ExtensionWithMime::new("dot", "text/vnd.graphviz"),
            ExtensionWithMime::new("svg", "image/svg+xml"),
            ExtensionWithMime::new("png", "image/png"),
        ]);
        formats
    }
}

#[cfg(test)]
mod tests {
    use crate::core::io::{Exportable, Importable};
    use crate::core::event_data::EventLog;
    use crate::core::process_models::petri_net::{ArcType, PetriNet};
    use crate::discovery::alpha::full::alpha_discover_petri_net;

    use super::PetriNetIOError;

    #[test]
    fn json_export_then_import() {
        let mut pn = PetriNet::new();
        let p = pn.add_place(Some("1".into()), None);
        let t = pn.add_transition(Some("a".into()), None);
        pn.add_arc(ArcType::place_to_transition(p, t), None);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("net.json");
        pn.export_to_path(&path).unwrap();
        let back = PetriNet::import_from_path(&path).unwrap();
        assert_eq!(back, pn);
    }

    #[test]
    fn pnml_export_to_writer() {
        let mut pn = PetriNet::new();
        pn.add_transition(Some("a".into()), None);
        let mut bytes = Vec::new();
        pn.export_to_writer(&mut bytes, "pnml").unwrap();
        assert!(String::from_utf8(bytes).unwrap().contains("<text>a</text>"));
    }

    #[test]
    fn discovered_net_to_pnml_file() {
        let log: EventLog = vec![vec!["a", "b", "d"], vec!["a", "c", "d"]].into();
        let pn = alpha_discover_petri_net(&log).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("alpha.pnml");
        pn.export_to_path(&path).unwrap();
        let pnml = std::fs::read_to_string(&path).unwrap();
        assert!(pnml.starts_with("<pnml>"));
        assert_eq!(pnml.matches("<place id=").count(), pn.places.len());
        assert_eq!(pnml.matches("<transition id=").count(), 4);
        assert_eq!(pnml.matches("<arc id=").count(), pn.arcs.len());
        assert!(pnml.contains("<text>Start</text>"));
        assert!(pnml.contains("<text>End</text>"));
        assert_eq!(pnml.matches("<initialMarking>").count(), 1);
        assert!(pnml.contains("<finalmarkings>"));
    }

    #[test]
    fn unknown_export_format() {
        let pn = PetriNet::new();
        let res = pn.export_to_writer(Vec::new(), "bpmn");
        assert!(matches!(res, Err(PetriNetIOError::UnsupportedFormat(_))));
    }
}
