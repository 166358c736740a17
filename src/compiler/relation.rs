//! Relation tree materialization and rendering
//!
//! Joins are folded left to right: the accumulated relation becomes the left
//! child and the newly joined table the right child, so the first declared
//! join ends up innermost.

use crate::datasource::{Join, JoinStep, OnClause, Relation};
use crate::xml::XmlElement;

/// Fold the declared joins onto the root relation
pub fn materialize_relation(root: &Relation, joins: &[JoinStep]) -> Relation {
    joins.iter().fold(root.clone(), |accumulated, step| {
        Relation::Join(Join {
            kind: step.kind,
            on_clauses: step.on_clauses.clone(),
            left: Box::new(accumulated),
            right: Box::new(Relation::from_source(&step.source, &step.alias)),
        })
    })
}

/// Render a relation tree as nested `<relation>` elements
pub fn render_relation(relation: &Relation) -> XmlElement {
    match relation {
        Relation::Table { name, alias } => XmlElement::new("relation")
            .with_attr("name", alias.as_str())
            .with_attr("table", format!("[{}]", name))
            .with_attr("type", "table"),
        Relation::CustomSql { sql, alias } => XmlElement::new("relation")
            .with_attr("name", alias.as_str())
            .with_attr("type", "text")
            .with_text(sql.as_str()),
        Relation::Join(join) => XmlElement::new("relation")
            .with_attr("join", join.kind.as_str())
            .with_attr("type", "join")
            .with_child(XmlElement::new("clause").with_attr("type", "join").with_child(render_on_clauses(&join.on_clauses)))
            .with_child(render_relation(&join.left))
            .with_child(render_relation(&join.right)),
    }
}

/// A single clause is used directly; several are combined under AND
fn render_on_clauses(clauses: &[OnClause]) -> XmlElement {
    match clauses {
        [single] => render_on_clause(single),
        many => many
            .iter()
            .fold(XmlElement::new("expression").with_attr("op", "AND"), |and, clause| {
                and.with_child(render_on_clause(clause))
            }),
    }
}

fn render_on_clause(clause: &OnClause) -> XmlElement {
    XmlElement::new("expression")
        .with_attr("op", clause.operator.as_str())
        .with_child(XmlElement::new("expression").with_attr("op", clause.left_reference()))
        .with_child(XmlElement::new("expression").with_attr("op", clause.right_reference()))
}
