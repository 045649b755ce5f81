use kiln_derive::kiln_error;

#[kiln_error]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(std::io::Error),
}

fn main() {}
