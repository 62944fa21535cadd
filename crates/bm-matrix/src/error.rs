use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MatrixError {
    #[error("index ({row}, {col}) out of range for {rows}x{cols} matrix")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        rows: usize,
        cols: usize,
    },
    #[error(
        "cannot map a {rows}x{cols} matrix onto {outer_rows}x{outer_cols} tiles of {block}x{block}"
    )]
    BlockShapeMismatch {
        rows: usize,
        cols: usize,
        outer_rows: usize,
        outer_cols: usize,
        block: usize,
    },
}

pub type Result<T> = std::result::Result<T, MatrixError>;
