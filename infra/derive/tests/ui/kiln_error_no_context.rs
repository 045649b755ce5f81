use kiln_derive::kiln_error;

#[kiln_error]
pub enum StoreError {
    #[error("Store unavailable: {source}")]
    Unavailable {
        #[source]
        source: std::io::Error,
    },
}

fn main() {}
