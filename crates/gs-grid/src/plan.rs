use gs_core::Error;

/// Rows and columns of a figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPlan {
    pub rows: usize,
    pub columns: usize,
}

impl GridPlan {
    pub const SINGLE: GridPlan = GridPlan {
        rows: 1,
        columns: 1,
    };

    /// Plans a grid for `num_images` images.
    ///
    /// Missing dimensions are derived; when both are missing, `rows` is
    /// `floor(sqrt(n))`, which favors more columns than rows. Explicit
    /// dimensions are used as given even if they under-allocate. A zero
    /// dimension counts as missing. Fails when `rows * columns` overflows.
    pub fn for_count(
        num_images: usize,
        rows: Option<usize>,
        columns: Option<usize>,
    ) -> Result<Self, Error> {
        let n = num_images.max(1);
        let rows = rows.filter(|&r| r > 0);
        let columns = columns.filter(|&c| c > 0);

        let plan = match (rows, columns) {
            (Some(rows), Some(columns)) => Self { rows, columns },
            (None, Some(columns)) => Self {
                rows: n.div_ceil(columns),
                columns,
            },
            (Some(rows), None) => Self {
                rows,
                columns: n.div_ceil(rows),
            },
            (None, None) => {
                let rows = n.isqrt();
                Self {
                    rows,
                    columns: n.div_ceil(rows),
                }
            }
        };

        match plan.rows.checked_mul(plan.columns) {
            Some(_) => Ok(plan),
            None => Err(Error::GridTooLarge {
                rows: plan.rows,
                columns: plan.columns,
            }),
        }
    }

    pub fn cells(&self) -> usize {
        self.rows * self.columns
    }

    /// Row-major `(row, column)` of cell `index`.
    ///
    /// `columns` must be non-zero.
    pub fn position(&self, index: usize) -> (usize, usize) {
        (index / self.columns, index % self.columns)
    }
}

#[cfg(test)]
mod tests {
    use gs_core::Error;

    use super::GridPlan;

    #[test]
    fn auto_plan_uses_floor_sqrt_rows() {
        let cases = [
            (1, 1, 1),
            (2, 1, 2),
            (3, 1, 3),
            (4, 2, 2),
            (5, 2, 3),
            (7, 2, 4),
            (9, 3, 3),
            (12, 3, 4),
            (30, 5, 6),
        ];
        for (n, rows, columns) in cases {
            let plan = GridPlan::for_count(n, None, None).expect("plan");
            assert_eq!(plan, GridPlan { rows, columns }, "n={n}");
        }
    }

    #[test]
    fn auto_plan_always_fits() {
        for n in 1..200 {
            let plan = GridPlan::for_count(n, None, None).expect("plan");
            assert!(plan.cells() >= n, "n={n}");
            assert_eq!(plan.rows, (n as f64).sqrt().floor() as usize);
        }
    }

    #[test]
    fn partial_dimensions_are_completed() {
        assert_eq!(
            GridPlan::for_count(7, None, Some(3)),
            Ok(GridPlan {
                rows: 3,
                columns: 3
            })
        );
        assert_eq!(
            GridPlan::for_count(7, Some(1), None),
            Ok(GridPlan {
                rows: 1,
                columns: 7
            })
        );
        assert_eq!(
            GridPlan::for_count(7, Some(2), Some(2)),
            Ok(GridPlan {
                rows: 2,
                columns: 2
            })
        );
        assert_eq!(
            GridPlan::for_count(5, Some(0), None),
            GridPlan::for_count(5, None, None)
        );
    }

    #[test]
    fn overflowing_dimensions_are_rejected() {
        assert_eq!(
            GridPlan::for_count(2, Some(usize::MAX), Some(2)),
            Err(Error::GridTooLarge {
                rows: usize::MAX,
                columns: 2
            })
        );
        assert!(GridPlan::for_count(2, Some(usize::MAX), Some(1)).is_ok());
    }

    #[test]
    fn positions_are_row_major() {
        let plan = GridPlan::for_count(12, None, None).expect("plan");
        assert_eq!(plan.position(0), (0, 0));
        assert_eq!(plan.position(3), (0, 3));
        assert_eq!(plan.position(4), (1, 0));
        assert_eq!(plan.position(11), (2, 3));
    }
}
