use kiln_derive::kiln_error;

#[kiln_error]
pub enum StoreError {
    #[error("Store unavailable: {source}")]
    Unavailable { source: std::io::Error, context: Option<String> },
}

fn main() {}
