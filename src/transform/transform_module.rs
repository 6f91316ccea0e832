use crate::extract::PatientTable;
use crate::transform::error::TransformError;
use crate::transform::traits::Strategy;
use log::debug;

/// Runs an ordered list of strategies over the patient table.
#[derive(Debug)]
pub struct TransformerModule {
    strategies: Vec<Box<dyn Strategy>>,
}

impl TransformerModule {
    pub fn new(strategies: Vec<Box<dyn Strategy>>) -> Self {
        TransformerModule { strategies }
    }

    pub fn add_strategy(&mut self, strategy: Box<dyn Strategy>) {
        self.strategies.push(strategy);
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn run(&self, table: &mut PatientTable) -> Result<(), TransformError> {
        for strategy in &self.strategies {
            let before = table.height();
            strategy.transform(table)?;
            let after = table.height();

            if before != after {
                return Err(TransformError::RowCountChanged {
                    strategy_name: format!("{strategy:?}"),
                    before,
                    after,
                });
            }
            debug!(
                "{strategy:?} finished. The table now has {} columns.",
                table.data().width()
            );
        }
        Ok(())
    }
}

impl PartialEq for TransformerModule {
    fn eq(&self, other: &Self) -> bool {
        self.strategies.len() == other.strategies.len()
            && self
                .strategies
                .iter()
                .zip(other.strategies.iter())
                .all(|(a, b)| format!("{:?}", a) == format!("{:?}", b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ColumnSchema, LabelTable};
    use crate::constants::{LAST_LINE_REACHED, pfs_days_col};
    use crate::transform::error::StrategyError;
    use crate::transform::strategies::{
        CodeLabelStrategy, CodedField, DurationStrategy, LineResolutionStrategy,
    };
    use polars::df;
    use rstest::rstest;

    #[derive(Debug)]
    struct DropEverythingStrategy;

    impl Strategy for DropEverythingStrategy {
        fn is_valid(&self, _table: &PatientTable) -> bool {
            true
        }

        fn internal_transform(&self, table: &mut PatientTable) -> Result<(), StrategyError> {
            *table = table.filter_rows(&vec![false; table.height()])?;
            Ok(())
        }
    }

    fn table() -> PatientTable {
        let df = df!(
            "1L_Fecha inicio" => &[Some("2020-01-01"), None],
            "1L_Fecha progresión" => &[Some("2020-07-01"), None],
            "1L_Esquema" => &[Some(1i64), None],
        )
        .unwrap();
        PatientTable::new(ColumnSchema::default(), df).unwrap()
    }

    #[rstest]
    fn test_run_in_order() {
        let module = TransformerModule::new(vec![
            Box::new(CodeLabelStrategy::new(
                CodedField::Regimen,
                LabelTable::default_regimens(),
            )),
            Box::new(LineResolutionStrategy::new()),
            Box::new(DurationStrategy::new()),
        ]);
        let mut table = table();

        module.run(&mut table).unwrap();

        assert_eq!(
            table.derived_i64(LAST_LINE_REACHED).unwrap(),
            vec![Some(1), Some(0)]
        );
        assert_eq!(
            table.derived_i64(&pfs_days_col(1)).unwrap(),
            vec![Some(182), None]
        );
        assert_eq!(
            table.derived_str("1L_Esquema").unwrap(),
            vec![Some("FFX".to_string()), None]
        );
    }

    #[rstest]
    fn test_row_count_must_be_preserved() {
        let mut module = TransformerModule::new(vec![]);
        module.add_strategy(Box::new(DropEverythingStrategy));
        let mut table = table();

        assert!(matches!(
            module.run(&mut table),
            Err(TransformError::RowCountChanged {
                before: 2,
                after: 0,
                ..
            })
        ));
    }
}
