/// Embeds a text file from the crate's `res/` directory. Paths start with `/`.
#[macro_export]
macro_rules! include_res {
    (str, $p:expr) => {
        include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/res", $p))
    };
}
