//! Value stream list projection.

use crate::store::Planner;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueStreamItem {
    pub id: String,
    pub name: String,
    pub description: String,
    pub color: String,
    /// Ids of teams that opted into this stream, in team order.
    pub team_ids: Vec<String>,
    pub team_names: Vec<String>,
}

impl ValueStreamItem {
    pub fn team_count(&self) -> usize {
        self.team_ids.len()
    }
}

pub fn value_stream_view(planner: &Planner) -> Vec<ValueStreamItem> {
    planner
        .value_streams()
        .iter()
        .map(|stream| {
            let (team_ids, team_names): (Vec<String>, Vec<String>) = planner
                .teams()
                .iter()
                .filter(|team| team.in_value_stream(&stream.id))
                .map(|team| (team.id.clone(), team.name.clone()))
                .unzip();
            ValueStreamItem {
                id: stream.id.clone(),
                name: stream.name.clone(),
                description: stream.description.clone(),
                color: stream.color.clone(),
                team_ids,
                team_names,
            }
        })
        .collect()
}
