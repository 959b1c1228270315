// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_doc_comment(parameters: usize) -> String {
    let mut comment = String::from("/// Does something useful with its inputs.\n///\n");
    comment.push_str("/// A longer discussion with `code`, *emphasis* and a [link](https://example.com).\n///\n");
    comment.push_str("/// - Parameters:\n");
    for index in 0..parameters {
        comment.push_str(&format!("///   - arg{index}: The argument number {index}.\n"));
    }
    comment.push_str("/// - Returns: The result.\n/// - Throws: An error when it fails.\n/// - Since: 1.0\n");
    comment
}

#[allow(dead_code)]
pub fn generate_source_file(items: usize) -> String {
    let mut source = String::new();
    for index in 0..items {
        source.push_str(&generate_doc_comment(3));
        source.push_str(&format!("pub fn item_{index}() {{}}\n\n"));
    }
    source
}
