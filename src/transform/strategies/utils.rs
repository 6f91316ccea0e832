use crate::extract::PatientTable;
use crate::transform::error::StrategyError;
use polars::prelude::Series;
use std::any::type_name;

/// The bare type name of a strategy, e.g. `LineResolutionStrategy`.
pub(crate) fn strategy_name<T: ?Sized>() -> String {
    type_name::<T>()
        .split("::")
        .last()
        .unwrap_or_default()
        .to_string()
}

pub(crate) fn write_column<T: ?Sized>(
    table: &mut PatientTable,
    series: Series,
) -> Result<(), StrategyError> {
    let column = series.name().to_string();
    table
        .upsert_column(series)
        .map(|_| ())
        .map_err(|source| StrategyError::ColumnWriteError {
            strategy_name: strategy_name::<T>(),
            column,
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ColumnSchema;
    use polars::df;
    use polars::prelude::NamedFrom;
    use rstest::rstest;

    #[derive(Debug)]
    struct DummyStrategy;

    #[rstest]
    fn test_strategy_name() {
        assert_eq!(strategy_name::<DummyStrategy>(), "DummyStrategy");
    }

    #[rstest]
    fn test_write_column_with_wrong_length() {
        let mut table = PatientTable::new(
            ColumnSchema::default(),
            df!("PS" => &[0i64, 1]).unwrap(),
        )
        .unwrap();

        let result = write_column::<DummyStrategy>(
            &mut table,
            Series::new("age".into(), vec![Some(61.0), Some(70.5), None]),
        );

        match result {
            Err(StrategyError::ColumnWriteError {
                strategy_name,
                column,
                ..
            }) => {
                assert_eq!(strategy_name, "DummyStrategy");
                assert_eq!(column, "age");
            }
            other => panic!("Unexpected result {other:?}"),
        }
    }
}
