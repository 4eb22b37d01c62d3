use object_resolver::{get_nested_property, Node};
use object_resolver_benches::available_corpora;

#[test]
fn benches_readme_example() {
    let corpus = available_corpora()
        .iter()
        .find(|corpus| corpus.name() == "record-list")
        .expect("registered corpus");
    let dataset = corpus.load();
    assert_eq!(dataset.leaf_paths().len(), 256 * 6);
    assert_eq!(
        get_nested_property(dataset.document(), "users.7.name", &Node::Void),
        &Node::from("user-7")
    );
}
