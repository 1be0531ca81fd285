use chart_plan::core::{OptionMap, OptionValue, ResolvedOptions};
use proptest::option;
use proptest::prelude::*;

// Keys `a`/`b` always hold objects and `x`/`y`/`z` always hold leaves, so
// every source agrees on the shape at each path.
fn leaf() -> BoxedStrategy<OptionValue> {
    prop_oneof![
        any::<bool>().prop_map(OptionValue::Bool),
        (-1_000_000.0f64..1_000_000.0).prop_map(OptionValue::Number),
        "[a-z]{0,6}".prop_map(OptionValue::String),
    ]
    .boxed()
}

fn leaves() -> BoxedStrategy<OptionMap> {
    (option::of(leaf()), option::of(leaf()), option::of(leaf()))
        .prop_map(|(x, y, z)| {
            let mut map = OptionMap::new();
            for (key, value) in [("x", x), ("y", y), ("z", z)] {
                if let Some(value) = value {
                    map.insert(key.to_owned(), value);
                }
            }
            map
        })
        .boxed()
}

fn nested(inner: BoxedStrategy<OptionMap>) -> BoxedStrategy<OptionMap> {
    (leaves(), option::of(inner.clone()), option::of(inner))
        .prop_map(|(mut map, a, b)| {
            for (key, value) in [("a", a), ("b", b)] {
                if let Some(value) = value {
                    map.insert(key.to_owned(), OptionValue::Object(value));
                }
            }
            map
        })
        .boxed()
}

fn tree() -> BoxedStrategy<OptionValue> {
    nested(nested(leaves()))
        .prop_map(OptionValue::Object)
        .boxed()
}

fn leaf_paths(value: &OptionValue, prefix: &str, out: &mut Vec<(String, OptionValue)>) {
    if let OptionValue::Object(map) = value {
        for (key, child) in map {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}.{key}")
            };
            leaf_paths(child, &path, out);
        }
    } else {
        out.push((prefix.to_owned(), value.clone()));
    }
}

proptest! {
    #[test]
    fn defaults_and_user_merge_associatively(base in tree(), defaults in tree(), user in tree()) {
        let three_way = ResolvedOptions::resolve(&base, &defaults, &user).expect("resolve");
        let folded = defaults.clone().merged(&user);
        let two_way = ResolvedOptions::resolve(&base, &folded, &OptionValue::Null).expect("resolve");

        prop_assert_eq!(three_way, two_way);
    }

    #[test]
    fn every_user_leaf_wins(base in tree(), defaults in tree(), user in tree()) {
        let resolved = ResolvedOptions::resolve(&base, &defaults, &user).expect("resolve");
        let mut paths = Vec::new();
        leaf_paths(&user, "", &mut paths);

        for (path, expected) in paths {
            prop_assert_eq!(resolved.get(&path), Some(&expected));
        }
    }

    #[test]
    fn resolving_is_idempotent(base in tree(), user in tree()) {
        let once = ResolvedOptions::resolve(&base, &OptionValue::Null, &user).expect("resolve");
        let twice = ResolvedOptions::resolve(once.as_value(), &OptionValue::Null, &user)
            .expect("resolve");

        prop_assert_eq!(once, twice);
    }
}
