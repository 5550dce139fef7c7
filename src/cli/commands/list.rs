use super::super::{Ctx, ListArgs, parse_sort};
use crate::Result;
use crate::app::{Action, App, EMPTY_MESSAGE, ItemView, ListView, Node, render_list};
use crate::core::Totals;
use crate::store::KvStore;

pub(crate) fn handle<S: KvStore>(app: &mut App<S>, ctx: &Ctx, args: ListArgs) -> Result<()> {
    if let Some(raw) = args.sort.as_deref() {
        let key = parse_sort(raw)?;
        app.dispatch(Action::SortChange(Some(key)))?;
    }

    let view = filter_view(app.view(), &args);
    if ctx.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", render_list(&view));
    }
    Ok(())
}

/// Filtering is a display concern: it narrows the already-sorted tree and
/// recomputes the footer over what is shown. The stored collection and
/// its aggregate invariants are untouched.
fn filter_view(view: &ListView, args: &ListArgs) -> ListView {
    if args.category.is_none() && args.status.is_none() && !args.favorites {
        return view.clone();
    }

    let nodes: Vec<Node> = view
        .nodes
        .iter()
        .filter(|node| match node {
            Node::Empty { .. } => false,
            Node::Item(item) => matches(item, args),
        })
        .cloned()
        .collect();

    let totals = nodes.iter().fold(Totals::default(), |acc, node| {
        let Node::Item(item) = node else { return acc };
        Totals {
            count: acc.count + 1,
            total_hours: acc.total_hours + item.hours,
            total_cost: acc.total_cost + item.cost,
        }
    });

    let nodes = if nodes.is_empty() {
        vec![Node::Empty {
            message: EMPTY_MESSAGE.to_string(),
        }]
    } else {
        nodes
    };

    ListView {
        nodes,
        totals,
        sort: view.sort,
    }
}

fn matches(item: &ItemView, args: &ListArgs) -> bool {
    let eq = |want: &Option<String>, have: &Option<String>| match want {
        None => true,
        Some(want) => have
            .as_deref()
            .is_some_and(|have| have.eq_ignore_ascii_case(want)),
    };
    eq(&args.category, &item.category)
        && eq(&args.status, &item.status)
        && (!args.favorites || item.favorite)
}
