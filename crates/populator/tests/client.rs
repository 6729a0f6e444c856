use mockito::{Matcher, Server, ServerGuard};
use rstest::{fixture, rstest};
use serde_json::json;
use stac::{Collection, Item};
use stac_populator::{Client, CollectionDescriptor, Config, Error, Populator, Upsert};

#[fixture]
fn server() -> ServerGuard {
    Server::new()
}

#[fixture]
fn collection() -> Collection {
    let descriptor = CollectionDescriptor::from_path("data/collection.json").unwrap();
    stac_populator::create_stac_collection("ouranos-cmip6", &descriptor).unwrap()
}

fn client(update: bool) -> Client {
    Client::with_config(Config {
        update,
        ..Default::default()
    })
    .unwrap()
}

#[rstest]
fn reachable(mut server: ServerGuard) {
    let ok = server.mock("GET", "/").with_status(200).create();
    let missing = server.mock("GET", "/missing").with_status(404).create();
    let broken = server.mock("GET", "/broken").with_status(500).create();

    assert!(stac_populator::stac_host_reachable(&server.url()));
    assert!(!stac_populator::stac_host_reachable(&format!("{}/missing", server.url())));
    assert!(!stac_populator::stac_host_reachable(&format!("{}/broken", server.url())));
    ok.assert();
    missing.assert();
    broken.assert();
}

#[test]
fn unreachable_when_nothing_listens() {
    assert!(!stac_populator::stac_host_reachable("http://127.0.0.1:1"));
    assert!(!stac_populator::stac_collection_exists("http://127.0.0.1:1", "c1"));
}

#[rstest]
#[case(200, true)]
#[case(204, false)]
#[case(404, false)]
#[case(500, false)]
fn collection_exists(mut server: ServerGuard, #[case] status: usize, #[case] exists: bool) {
    let mock = server
        .mock("GET", "/collections/c1")
        .with_status(status)
        .create();
    assert_eq!(
        stac_populator::stac_collection_exists(&server.url(), "c1"),
        exists
    );
    mock.assert();
}

#[rstest]
fn collection_exists_under_a_path(mut server: ServerGuard) {
    let mock = server
        .mock("GET", "/stac/collections/c1")
        .with_status(200)
        .create();
    assert!(client(true).collection_exists(&format!("{}/stac/", server.url()), "c1"));
    mock.assert();
}

#[rstest]
fn create(mut server: ServerGuard, collection: Collection) {
    let post = server
        .mock("POST", "/collections")
        .match_body(Matcher::PartialJson(json!({
            "id": "ouranos-cmip6",
            "summaries": {"needs_summaries_update": ["true"]},
        })))
        .with_status(200)
        .create();
    let put = server.mock("PUT", "/collections").expect(0).create();
    let upsert = stac_populator::post_stac_collection(&server.url(), &collection).unwrap();
    assert_eq!(upsert, Upsert::Created);
    post.assert();
    put.assert();
}

#[rstest]
fn create_with_201(mut server: ServerGuard, collection: Collection) {
    let post = server.mock("POST", "/collections").with_status(201).create();
    assert_eq!(
        client(true).post_collection(&server.url(), &collection).unwrap(),
        Upsert::Created
    );
    post.assert();
}

#[rstest]
fn update_on_conflict(mut server: ServerGuard, collection: Collection) {
    let post = server.mock("POST", "/collections").with_status(409).create();
    let put = server
        .mock("PUT", "/collections")
        .match_body(Matcher::PartialJson(json!({"id": "ouranos-cmip6"})))
        .with_status(200)
        .create();
    let upsert = stac_populator::post_stac_collection(&server.url(), &collection).unwrap();
    assert_eq!(upsert, Upsert::Updated);
    post.assert();
    put.assert();
}

#[rstest]
fn failed_update(mut server: ServerGuard, collection: Collection) {
    let _post = server.mock("POST", "/collections").with_status(409).create();
    let _put = server.mock("PUT", "/collections").with_status(500).create();
    let err = stac_populator::post_stac_collection(&server.url(), &collection).unwrap_err();
    assert!(matches!(
        err,
        Error::HttpStatus { method, status, .. }
            if method == reqwest::Method::PUT && status.as_u16() == 500
    ));
}

#[rstest]
fn failed_create(mut server: ServerGuard, collection: Collection) {
    let _post = server.mock("POST", "/collections").with_status(500).create();
    let put = server.mock("PUT", "/collections").expect(0).create();
    let err = stac_populator::post_stac_collection(&server.url(), &collection).unwrap_err();
    assert!(matches!(
        err,
        Error::HttpStatus { method, status, .. }
            if method == reqwest::Method::POST && status.as_u16() == 500
    ));
    put.assert();
}

#[rstest]
fn conflict_without_update(mut server: ServerGuard, collection: Collection) {
    let post = server.mock("POST", "/collections").with_status(409).create();
    let put = server.mock("PUT", "/collections").expect(0).create();
    assert_eq!(
        client(false).post_collection(&server.url(), &collection).unwrap(),
        Upsert::Exists
    );
    post.assert();
    put.assert();
}

#[test]
fn transport_error_is_propagated() {
    let descriptor = CollectionDescriptor::from_path("data/collection.json").unwrap();
    let collection = stac_populator::create_stac_collection("c1", &descriptor).unwrap();
    assert!(matches!(
        stac_populator::post_stac_collection("http://127.0.0.1:1", &collection).unwrap_err(),
        Error::Reqwest(_)
    ));
}

#[rstest]
fn item_gets_the_collection(mut server: ServerGuard) {
    let post = server
        .mock("POST", "/collections/c1/items")
        .match_body(Matcher::PartialJson(json!({"id": "an-item", "collection": "c1"})))
        .with_status(200)
        .create();
    let item = Item::new("an-item");
    assert_eq!(
        stac_populator::post_stac_item(&server.url(), "c1", &item).unwrap(),
        Upsert::Created
    );
    post.assert();
}

#[rstest]
fn item_collection_is_overwritten(mut server: ServerGuard) {
    let post = server
        .mock("POST", "/collections/c1/items")
        .match_body(Matcher::PartialJson(json!({"id": "an-item", "collection": "c1"})))
        .with_status(200)
        .create();
    let mut item = Item::new("an-item");
    item.collection = Some("other".to_string());
    assert_eq!(
        client(true).post_item(&server.url(), "c1", &item).unwrap(),
        Upsert::Created
    );
    assert_eq!(item.collection.as_deref(), Some("other"));
    post.assert();
}

#[rstest]
fn item_update_on_conflict(mut server: ServerGuard) {
    let post = server
        .mock("POST", "/collections/c1/items")
        .with_status(409)
        .create();
    let put = server
        .mock("PUT", "/collections/c1/items")
        .with_status(200)
        .create();
    let item: Item = serde_json::from_str(include_str!("../data/item.json")).unwrap();
    assert_eq!(
        client(true).post_item(&server.url(), "c1", &item).unwrap(),
        Upsert::Updated
    );
    post.assert();
    put.assert();
}

#[rstest]
fn item_failure(mut server: ServerGuard) {
    let _post = server
        .mock("POST", "/collections/c1/items")
        .with_status(400)
        .create();
    assert!(matches!(
        client(true)
            .post_item(&server.url(), "c1", &Item::new("an-item"))
            .unwrap_err(),
        Error::HttpStatus { .. }
    ));
}

#[rstest]
fn populator(mut server: ServerGuard) {
    let root = server.mock("GET", "/").with_status(200).create();
    let collection = server
        .mock("POST", "/collections")
        .match_body(Matcher::PartialJson(json!({"id": "ouranos-cmip6"})))
        .with_status(200)
        .create();
    let items = server
        .mock("POST", "/collections/ouranos-cmip6/items")
        .match_body(Matcher::PartialJson(json!({"collection": "ouranos-cmip6"})))
        .with_status(200)
        .expect(2)
        .create();

    let descriptor = CollectionDescriptor::from_path("data/collection.yaml").unwrap();
    let mut populator = Populator::new(server.url(), descriptor, client(true)).unwrap();
    assert_eq!(populator.collection_id(), "ouranos-cmip6");
    assert_eq!(populator.collection_name(), "CMIP6 Ouranos");
    assert_eq!(populator.stac_host(), server.url());

    let published = populator.publish_collection().unwrap();
    assert_eq!(published.id, "ouranos-cmip6");
    let count = populator
        .ingest(vec![Item::new("a"), Item::new("b")])
        .unwrap();
    assert_eq!(count, 2);

    root.assert();
    collection.assert();
    items.assert();
}

#[rstest]
fn populator_rejects_bad_hosts(mut server: ServerGuard) {
    let descriptor = CollectionDescriptor::from_path("data/collection.yaml").unwrap();
    assert!(matches!(
        Populator::new("not a url", descriptor.clone(), client(true)).unwrap_err(),
        Error::InvalidHost(_)
    ));

    let _root = server.mock("GET", "/").with_status(503).create();
    assert!(matches!(
        Populator::new(server.url(), descriptor, client(true)).unwrap_err(),
        Error::UnreachableHost(_)
    ));
}

#[test]
fn populator_requires_definitions() {
    let mut descriptor = CollectionDescriptor::from_path("data/collection.yaml").unwrap();
    let _ = descriptor.fields.remove("license");
    assert!(matches!(
        Populator::new("http://127.0.0.1:1", descriptor, client(true)).unwrap_err(),
        Error::MissingDefinition(definition) if definition == "license"
    ));
}
