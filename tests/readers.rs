use cogsmith_data::{Coord, ItemKind};
use cogsmith_io::{parse_blocked, parse_flaggies, parse_items, FieldKind, ReadError};

const HEADER: &str = "cog type,build_rate,flaggy_rate,exp_mult,exp_rate,name,build_rate_boost,flaggy_rate_boost,flaggy_speed,exp_rate_boost";

fn inventory(rows: &[&str]) -> String {
    std::iter::once(HEADER)
        .chain(rows.iter().copied())
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn test_full_inventory_reads_in_order() {
    let text = inventory(&[
        "Cog,40,10,0.11,,,,,,",
        "Character,12,0,,1.5,Ada,,,,",
        "Yang_Cog,0,0,0,,,0.1,0.1,,",
        "X_Cog,0,0,0,,,0.2,,,",
        "Plus_Cog,0,0,0,,,0.2,,,",
        "Left_Cog,0,0,0,,,0.3,,,",
        "Right_Cog,0,0,0,,,0.3,,,",
        "Up_Cog,0,0,0,,,0.3,,,",
        "Down_Cog,0,0,0,,,0.3,,,",
        "Row_Cog,0,0,0,,,0.1,,,",
        "Col_Cog,0,0,0,,,0.1,,,",
        "Omni_Cog,0,0,0,,,,,0.4,",
    ]);
    let records = parse_items("cog_datas.csv", &text).unwrap();
    let kinds: Vec<ItemKind> = records.iter().map(|r| r.kind).collect();
    assert_eq!(kinds, ItemKind::ALL.to_vec());
    assert_eq!(records[11].boosts().flaggy_speed, 0.4);
}

#[test]
fn test_negative_rate_names_row_and_field() {
    let text = inventory(&["Cog,1,1,0,,,,,,", "Cog,2,2,0,,,,,,", "Cog,3,-4,0,,,,,,"]);
    let err = parse_items("cog_datas.csv", &text).unwrap_err();
    assert_eq!(err.row(), Some(2));
    assert_eq!(err.column(), Some("flaggy_rate"));
    let message = err.to_string();
    assert!(message.contains("row 2"), "{message}");
    assert!(message.contains("`flaggy_rate`"), "{message}");
    assert!(message.contains("`-4`"), "{message}");
}

#[test]
fn test_non_numeric_rate_names_row_and_field() {
    let text = inventory(&["Cog,fast,1,0,,,,,,"]);
    match parse_items("cog_datas.csv", &text).unwrap_err() {
        ReadError::InvalidField {
            row,
            column,
            expected,
            found,
            ..
        } => {
            assert_eq!(row, 0);
            assert_eq!(column, "build_rate");
            assert_eq!(expected, FieldKind::NonNegativeInteger);
            assert_eq!(found, "fast");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_fractional_rate_is_rejected() {
    let text = inventory(&["Cog,2.5,1,0,,,,,,"]);
    let err = parse_items("cog_datas.csv", &text).unwrap_err();
    assert_eq!(err.column(), Some("build_rate"));
}

#[test]
fn test_out_of_bounds_blocked_cell_is_distinct() {
    let err = parse_blocked("empties_datas.csv", "empties_x,empties_y\n1,1\n12,0\n").unwrap_err();
    assert!(matches!(
        err,
        ReadError::OutOfBounds {
            row: 1,
            value: 12,
            limit: 12,
            ..
        }
    ));
    assert_eq!(err.column(), Some("empties_x"));

    let err = parse_blocked("empties_datas.csv", "empties_x,empties_y\n0,x\n").unwrap_err();
    assert!(matches!(err, ReadError::InvalidField { .. }));
}

#[test]
fn test_whole_shelf_edges_are_in_bounds() {
    let cells = parse_blocked(
        "empties_datas.csv",
        "empties_x,empties_y\n0,0\n11,0\n0,7\n11.0,7\n",
    )
    .unwrap();
    assert_eq!(cells.len(), 4);
    assert!(cells.contains(&Coord::new(11, 7)));

    let flags = parse_flaggies("flaggies.csv", "flaggies_x,flaggies_y\n").unwrap();
    assert!(flags.is_empty());
}
