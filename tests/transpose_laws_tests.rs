//! Structural laws of the transpose over generated tables.


use gridshape_core::types::Table;
use gridshape_operators::transpose::codec;
use gridshape_operators::{Operation, Registry, TransposeColumnsIntoRows, TransposeConfig};
use test_data_gen::{diagonal_table, narrow_table, transpose_record, wide_table};

fn run(cfg: TransposeConfig, table: &Table) -> Table {
    let op = TransposeColumnsIntoRows::new(cfg);
    let (_, change) = op.create_change(table).expect("create_change failed");
    change.into_table()
}

#[test]
fn test_column_count_law() {
    let table = wide_table(4, 6, 0);
    for start in 1..=6 {
        let name = format!("v{}", start - 1);
        let available = 7 - start;
        for count in 1..=available {
            let out = run(TransposeConfig::new(name.as_str(), count), &table);
            assert_eq!(
                out.num_columns(),
                table.num_columns() - count + 1,
                "start {} count {}",
                name,
                count
            );
        }
    }
}

#[test]
fn test_row_count_law_with_single_transposed_cell() {
    let table = narrow_table(25);
    let out = run(TransposeConfig::new("v0", 1), &table);
    assert_eq!(out.num_rows(), table.num_rows());
}

#[test]
fn test_row_count_law_with_one_value_per_range() {
    let table = diagonal_table(30, 4);
    let out = run(
        TransposeConfig::new("v0", 4)
            .with_combined_column_name("value")
            .with_ignore_blank_cells(true),
        &table,
    );

    assert_eq!(out.num_rows(), table.num_rows());
    assert_eq!(out.columns.names(), vec!["key", "value", "tail"]);
    for (r, row) in out.rows.iter().enumerate() {
        assert_eq!(row.value(1), Some(&gridshape_core::types::Scalar::Int(r as i64)));
    }
}

#[test]
fn test_row_count_with_blanks_matches_non_blank_cells() {
    let table = wide_table(12, 4, 3);
    let out = run(TransposeConfig::new("v0", 4), &table);

    let expected: usize = table
        .rows
        .iter()
        .map(|r| (1..=4).filter(|&c| !r.cells[c].is_blank()).count().max(1))
        .sum();
    assert_eq!(out.num_rows(), expected);
}

#[test]
fn test_cells_outside_range_keep_relative_order() {
    let table = wide_table(5, 3, 0);
    let out = run(
        TransposeConfig::new("v1", 1).with_combined_column_name("middle"),
        &table,
    );
    assert_eq!(out.columns.names(), vec!["key", "v0", "middle", "v2", "tail"]);

    let out = run(TransposeConfig::new("v0", 2), &table);
    assert_eq!(out.columns.names(), vec!["key", "v0", "v2", "tail"]);

    // Extra rows are blank outside the combined column; first rows follow
    // their source rows in order.
    let keys = out.column_values("key").unwrap();
    let tails = out.column_values("tail").unwrap();
    let v2 = out.column_values("v2").unwrap();
    let mut src = 0;
    for i in 0..out.num_rows() {
        if keys[i].is_none() {
            assert!(tails[i].is_none() && v2[i].is_none());
            continue;
        }
        assert_eq!(keys[i], table.rows[src].value(0));
        assert_eq!(v2[i], table.rows[src].value(3));
        assert_eq!(tails[i], table.rows[src].value(4));
        src += 1;
    }
    assert_eq!(src, table.num_rows());
}

#[test]
fn test_transposed_values_keep_column_order() {
    let table = wide_table(3, 4, 0);
    let out = run(TransposeConfig::new("v0", 4), &table);

    let values: Vec<_> = out.column_values("v0").unwrap();
    let expected: Vec<_> = table
        .rows
        .iter()
        .flat_map(|r| (1..=4).map(move |c| r.value(c)))
        .collect();
    assert_eq!(values, expected);
}

#[test]
fn test_record_round_trip_reproduces_behavior() {
    let table = wide_table(6, 3, 2);
    let cfg = TransposeConfig::new("v0", 3)
        .with_combined_column_name("value")
        .with_prepended_column_name("|")
        .with_ignore_blank_cells(false);

    let record = codec::encode(&cfg).unwrap();
    assert_eq!(codec::decode(&record).unwrap(), cfg);

    let original = TransposeColumnsIntoRows::new(cfg);
    let rebuilt = Registry::default().reconstruct(&record).unwrap();
    assert_eq!(rebuilt.to_record().unwrap(), record);
    assert_eq!(
        original.create_change(&table).unwrap(),
        rebuilt.create_change(&table).unwrap()
    );
}

#[test]
fn test_persisted_record_with_description_is_accepted() {
    let record = transpose_record("v1", 2, "", true, "-", true);
    let op = Registry::default().reconstruct(&record).unwrap();
    assert_eq!(op.describe(), record["description"].as_str().unwrap());

    let out = op.create_change(&wide_table(2, 3, 0)).unwrap().1.into_table();
    assert_eq!(out.columns.names(), vec!["key", "v0", "v1", "tail"]);
}

#[test]
fn test_same_inputs_same_output() {
    let table = wide_table(20, 5, 4);
    let cfg = TransposeConfig::new("v1", 3).with_prepended_column_name(":");
    assert_eq!(run(cfg.clone(), &table), run(cfg, &table));
}
