use super::*;

#[test]
fn detail_paths_embed_ids() {
    assert_eq!(course(12), "/curso/12");
    assert_eq!(institution(3), "/instituicao/3");
}

#[test]
fn parse_id_accepts_positive_integers_only() {
    assert_eq!(parse_id(Some("42".to_owned())), Some(42));
    assert_eq!(parse_id(Some(" 7 ".to_owned())), Some(7));
    assert_eq!(parse_id(Some("0".to_owned())), None);
    assert_eq!(parse_id(Some("abc".to_owned())), None);
    assert_eq!(parse_id(None), None);
}
