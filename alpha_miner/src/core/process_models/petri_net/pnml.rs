//! PNML File Format for Petri nets
use std::{fs::File, io::Write};

use itertools::Itertools;
use quick_xml::{events::BytesText, Writer};

use super::petri_net_struct::PetriNet;

const OK: Result<(), std::io::Error> = Ok(());

fn write_text_element<W: Write>(
    writer: &mut Writer<W>,
    name: &str,
    text: &str,
) -> Result<(), std::io::Error> {
    writer
        .create_element(name)
        .write_inner_content(|writer| {
            writer
                .create_element("text")
                .write_text_content(BytesText::new(text))?;
            OK
        })?;
    OK
}

///
/// Export a [`PetriNet`] to the PNML format using the provided [`quick_xml::Writer`]
///
/// Nodes and arcs are written in a stable order (sorted by ID).
///
pub fn export_petri_net_to_pnml<W: Write>(
    pn: &PetriNet,
    writer: &mut Writer<W>,
) -> Result<(), quick_xml::Error> {
    writer
        .create_element("pnml")
        .write_inner_content(|writer| {
            writer
                .create_element("net")
                .with_attributes(vec![
                    ("id", "Alpha Miner Export"),
                    (
                        "type",
                        "http://www.pnml.org/version-2009/grammar/pnmlcoremodel",
                    ),
                ])
                .write_inner_content(|writer| {
                    writer
                        .create_element("page")
                        .with_attribute(("id", "n0"))
                        .write_inner_content(|writer| {
                            for (id, place) in pn.places.iter().sorted_by_key(|(id, _)| **id) {
                                let id_str = id.to_string();
                                writer
                                    .create_element("place")
                                    .with_attribute(("id", id_str.as_str()))
                                    .write_inner_content(|writer| {
                                        write_text_element(
                                            writer,
                                            "name",
                                            place.label.as_deref().unwrap_or(id_str.as_str()),
                                        )?;
                                        let tokens = pn.initial_tokens(&place.into());
                                        if tokens > 0 {
                                            write_text_element(
                                                writer,
                                                "initialMarking",
                                                tokens.to_string().as_str(),
                                            )?;
                                        }
                                        OK
                                    })?;
                            }
                            for (id, transition) in
                                pn.transitions.iter().sorted_by_key(|(id, _)| **id)
                            {
                                writer
                                    .create_element("transition")
                                    .with_attribute(("id", id.to_string().as_str()))
                                    .write_inner_content(|writer| {
                                        write_text_element(
                                            writer,
                                            "name",
                                            transition.label.as_deref().unwrap_or("Tau"),
                                        )?;
                                        if transition.label.is_none() {
                                            writer
                                                .create_element("toolspecific")
                                                .with_attributes(vec![
                                                    ("tool", "ProM"),
                                                    ("version", "6.4"),
                                                    ("activity", "$invisible$"),
                                                    ("localNodeID", id.to_string().as_str()),
                                                ])
                                                .write_empty()?;
                                        }
                                        OK
                                    })?;
                            }
                            for arc in pn.arcs.iter().sorted() {
                                let (source_id, target_id) = arc.from_to.source_target();
                                writer
                                    .create_element("arc")
                                    .with_attribute((
                                        "id",
                                        format!("{source_id}{target_id}").as_str(),
                                    ))
                                    .with_attribute(("source", source_id.to_string().as_str()))
                                    .with_attribute(("target", target_id.to_string().as_str()))
                                    .write_inner_content(|writer| {
                                        write_text_element(
                                            writer,
                                            "inscription",
                                            arc.weight.to_string().as_str(),
                                        )
                                    })?;
                            }
                            OK
                        })?;

                    if let Some(final_markings) = &pn.final_markings {
                        writer
                            .create_element("finalmarkings")
                            .write_inner_content(|writer| {
                                for marking in final_markings {
                                    writer.create_element("marking").write_inner_content(
                                        |writer| {
                                            for (place_id, tokens) in
                                                marking.iter().sorted_by_key(|(p, _)| **p)
                                            {
                                                writer
                                                    .create_element("place")
                                                    .with_attribute((
                                                        "idref",
                                                        place_id.get_uuid().to_string().as_str(),
                                                    ))
                                                    .write_inner_content(|writer| {
                                                        writer
                                                            .create_element("text")
                                                            .write_text_content(BytesText::new(
                                                                tokens.to_string().as_str(),
                                                            ))?;
                                                        OK
                                                    })?;
                                            }
                                            OK
                                        },
                                    )?;
                                }
                                OK
                            })?;
                    }

                    // </net>
                    OK
                })?;
            OK
        })?;
    Ok(())
}

/// Export a [`PetriNet`] to a `.pnml` file (specified through path)
///
/// Also consider using [`PetriNet::export_pnml`] for convenience or [`export_petri_net_to_pnml`] for more control.
pub fn export_petri_net_to_pnml_path<P: AsRef<std::path::Path>>(
    pn: &PetriNet,
    path: P,
) -> Result<(), quick_xml::Error> {
    let file = File::create(path)?;
    let mut writer = Writer::new_with_indent(file, b' ', 4);
    export_petri_net_to_pnml(pn, &mut writer)
}
