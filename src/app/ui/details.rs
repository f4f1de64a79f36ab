use eframe::egui::{self, RichText, Ui};

use connectome_view::connectome::Edge;
use connectome_view::util::{display_name, format_weight};

use super::super::{ConnectionEntry, ViewModel};

const ROW_HEIGHT: f32 = 20.0;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Neuron Details");
        ui.add_space(6.0);

        let Some(selected) = self.selected else {
            ui.label("Click a neuron in the scene or a search result.");
            return;
        };

        let Some(name) = self.graph.node_name(selected) else {
            ui.label("Selected neuron no longer exists in the graph.");
            return;
        };
        let name = display_name(name).to_owned();

        let outgoing = self.connection_entries(selected, Direction::Outgoing);
        let incoming = self.connection_entries(selected, Direction::Incoming);
        let self_loop = outgoing
            .iter()
            .find(|entry| entry.node == selected)
            .map(|entry| entry.weight);

        ui.label(RichText::new(name).strong());
        ui.add_space(4.0);
        ui.label(format!(
            "Outgoing: {} connections, total weight {}",
            outgoing.len(),
            format_weight(outgoing.iter().map(|entry| entry.weight).sum())
        ));
        ui.label(format!(
            "Incoming: {} connections, total weight {}",
            incoming.len(),
            format_weight(incoming.iter().map(|entry| entry.weight).sum())
        ));
        if let Some(weight) = self_loop {
            ui.label(format!("Self-connection weight: {}", format_weight(weight)));
        }

        ui.separator();
        ui.label(RichText::new("Postsynaptic partners").strong());
        if let Some(node) = Self::draw_connection_list(ui, "outgoing_scroll", &outgoing) {
            self.set_selected(Some(node));
        }

        ui.separator();
        ui.label(RichText::new("Presynaptic partners").strong());
        if let Some(node) = Self::draw_connection_list(ui, "incoming_scroll", &incoming) {
            self.set_selected(Some(node));
        }
    }

    fn connection_entries(&self, node: usize, direction: Direction) -> Vec<ConnectionEntry> {
        let partner = |edge: &Edge| match direction {
            Direction::Outgoing => edge.target,
            Direction::Incoming => edge.source,
        };
        let edges = match direction {
            Direction::Outgoing => self.graph.outgoing(node).collect::<Vec<_>>(),
            Direction::Incoming => self.graph.incoming(node).collect::<Vec<_>>(),
        };

        let mut entries = edges
            .into_iter()
            .map(|(_, edge)| {
                let other = partner(edge);
                ConnectionEntry {
                    node: other,
                    name: display_name(self.graph.node_name(other).unwrap_or_default())
                        .to_owned(),
                    weight: edge.weight,
                }
            })
            .collect::<Vec<_>>();
        entries.sort_by(|a, b| {
            b.weight
                .abs()
                .total_cmp(&a.weight.abs())
                .then_with(|| a.name.cmp(&b.name))
        });
        entries
    }

    fn draw_connection_list(ui: &mut Ui, id: &str, entries: &[ConnectionEntry]) -> Option<usize> {
        if entries.is_empty() {
            ui.label("None.");
            return None;
        }

        let mut clicked = None;
        egui::ScrollArea::vertical()
            .id_salt(id)
            .max_height(260.0)
            .auto_shrink([false, true])
            .show_rows(ui, ROW_HEIGHT, entries.len(), |ui, row_range| {
                for entry in &entries[row_range] {
                    let label = format!("{}  ({})", entry.name, format_weight(entry.weight));
                    if ui.link(label).clicked() {
                        clicked = Some(entry.node);
                    }
                }
            });
        clicked
    }
}

#[derive(Clone, Copy)]
enum Direction {
    Outgoing,
    Incoming,
}
