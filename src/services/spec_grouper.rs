// src/services/spec_grouper.rs

use std::collections::HashMap;

use uuid::Uuid;

use crate::models::catalog::{SpecGroup, SpecItem};

/// Posição do grupo sintético "sem categoria": sempre o último.
pub const UNCATEGORIZED_RANK: i32 = 9999;
pub const UNCATEGORIZED_NAME: &str = "—";

/// Categoria de um parâmetro, já com o nome traduzido.
#[derive(Debug, Clone)]
pub struct GroupKey {
    pub id: Uuid,
    pub rank: i32,
    pub name: String,
}

/// Um parâmetro técnico pronto para agrupar (texto já traduzido).
#[derive(Debug, Clone)]
pub struct SpecParameter {
    pub id: Uuid,
    pub category: Option<GroupKey>,
    pub order: i32,
    pub text: String,
}

/// Agrupa por categoria e ordena os grupos pelo rank da categoria (empate: nome).
///
/// Os itens de cada grupo mantêm a ordem de entrada; a consulta de origem já
/// os entrega ordenados por `order`, então não reordenamos aqui.
pub fn group(parameters: impl IntoIterator<Item = SpecParameter>) -> Vec<SpecGroup> {
    let mut groups: Vec<(i32, SpecGroup)> = Vec::new();
    let mut slots: HashMap<Option<Uuid>, usize> = HashMap::new();

    for parameter in parameters {
        let key = parameter.category.as_ref().map(|category| category.id);
        let slot = *slots.entry(key).or_insert_with(|| {
            let (rank, name) = match &parameter.category {
                Some(category) => (category.rank, category.name.clone()),
                None => (UNCATEGORIZED_RANK, UNCATEGORIZED_NAME.to_string()),
            };
            groups.push((rank, SpecGroup { category_name: name, parameters: Vec::new() }));
            groups.len() - 1
        });

        groups[slot].1.parameters.push(SpecItem {
            id: parameter.id,
            text: parameter.text,
            order: parameter.order,
        });
    }

    // sort_by é estável: grupos com mesmo rank e nome ficam na ordem em que apareceram
    groups.sort_by(|(rank_a, group_a), (rank_b, group_b)| {
        rank_a
            .cmp(rank_b)
            .then_with(|| group_a.category_name.cmp(&group_b.category_name))
    });

    groups.into_iter().map(|(_, group)| group).collect()
}
