use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use proplink::error::Error;
use proplink::media::MediaFile;
use proplink::model::{
    HouseFeatures, HouseType, LandFeatures, LandSizeUnit, PropertyFeatures, PropertyStatus,
};
use proplink::workflow::{self, PropertyDraft, PropertyUpdate};
use proplink::Supabase;

const TOKEN: &str = "test-access-token";

fn image_file(name: &str) -> MediaFile {
    MediaFile {
        file_name: name.to_string(),
        content_type: "image/jpeg".to_string(),
        bytes: vec![0xFF, 0xD8, 0xFF],
    }
}

fn media_json(
    server_uri: &str,
    property_id: Uuid,
    bucket: &str,
    object: &str,
    display_order: i32,
) -> serde_json::Value {
    json!({
        "id": Uuid::new_v4(),
        "property_id": property_id,
        "media_type": if bucket.ends_with("videos") { "video" } else { "image" },
        "media_url": format!("{}/storage/v1/object/public/{}/{}", server_uri, bucket, object),
        "display_order": display_order,
        "created_at": "2024-05-01T12:00:01Z"
    })
}

fn owned_property_json(
    property_id: Uuid,
    seller_id: Uuid,
    media: Vec<serde_json::Value>,
) -> serde_json::Value {
    json!({
        "id": property_id,
        "seller_id": seller_id,
        "title": "4 Bedroom Duplex",
        "description": "A lovely place",
        "property_type": "house",
        "price_min": 50_000_000i64,
        "price_max": null,
        "country": "Nigeria",
        "state": "Lagos",
        "lga": "Eti-Osa",
        "city": "Lekki",
        "features": { "house_types": ["duplex"] },
        "status": "active",
        "created_at": "2024-05-01T12:00:00Z",
        "updated_at": null,
        "property_media": media
    })
}

fn land_draft() -> PropertyDraft {
    PropertyDraft {
        title: "Corner plot in Epe".to_string(),
        description: "Dry land with C of O".to_string(),
        price_min: 5_000_000,
        price_max: None,
        country: "Nigeria".to_string(),
        state: "Lagos".to_string(),
        lga: Some("Epe".to_string()),
        city: None,
        features: PropertyFeatures::Land(LandFeatures {
            land_size: Some(500.0),
            land_size_unit: LandSizeUnit::Sqm,
            additional_features: vec!["Fenced".to_string()],
        }),
    }
}

#[tokio::test]
async fn create_inserts_the_row_then_uploads_media() {
    let mock_server = MockServer::start().await;
    let property_id = Uuid::new_v4();
    let seller_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/rest/v1/properties"))
        .and(body_partial_json(json!({
            "seller_id": seller_id,
            "property_type": "land",
            "status": "active",
            "features": { "land_size": 500.0, "land_size_unit": "sqm" }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            owned_property_json(property_id, seller_id, vec![])
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/property-images/.+\.jpg$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Key": "ok" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/rest/v1/property_media"))
        .and(body_partial_json(json!({
            "property_id": property_id,
            "media_type": "image",
            "display_order": 0
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let supabase = Supabase::new(&mock_server.uri(), "test-anon-key");
    let property = workflow::create_property(
        &supabase,
        TOKEN,
        seller_id,
        land_draft(),
        vec![image_file("plot.jpg")],
    )
    .await
    .unwrap();

    assert_eq!(property.id, property_id);
}

#[tokio::test]
async fn create_keeps_the_row_when_an_upload_fails() {
    let mock_server = MockServer::start().await;
    let property_id = Uuid::new_v4();
    let seller_id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path("/rest/v1/properties"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!([
            owned_property_json(property_id, seller_id, vec![])
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/property-images/.+$"))
        .respond_with(ResponseTemplate::new(500).set_body_string("disk full"))
        .expect(1)
        .mount(&mock_server)
        .await;

    // No linking row is written and the property row is never rolled back.
    Mock::given(method("POST"))
        .and(path("/rest/v1/property_media"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/properties"))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&mock_server)
        .await;

    let supabase = Supabase::new(&mock_server.uri(), "test-anon-key");
    let result = workflow::create_property(
        &supabase,
        TOKEN,
        seller_id,
        land_draft(),
        vec![image_file("plot.jpg")],
    )
    .await;

    assert!(matches!(result, Err(Error::Storage(_))));
}

#[tokio::test]
async fn delete_removes_storage_objects_rows_and_the_property() {
    let mock_server = MockServer::start().await;
    let property_id = Uuid::new_v4();
    let seller_id = Uuid::new_v4();
    let uri = mock_server.uri();

    let media = vec![
        media_json(&uri, property_id, "property-images", "a/1-0.jpg", 0),
        media_json(&uri, property_id, "property-videos", "a/1-1.mp4", 1),
        media_json(&uri, property_id, "property-images", "a/1-2.jpg", 2),
    ];

    Mock::given(method("GET"))
        .and(path("/rest/v1/properties"))
        .and(query_param("id", format!("eq.{}", property_id)))
        .and(query_param("seller_id", format!("eq.{}", seller_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            owned_property_json(property_id, seller_id, media)
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    // The video removal fails; the remaining removals and the row deletions
    // must still run.
    Mock::given(method("DELETE"))
        .and(path("/storage/v1/object/property-videos"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend down"))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/storage/v1/object/property-images"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(2)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/property_media"))
        .and(query_param("property_id", format!("eq.{}", property_id)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/rest/v1/properties"))
        .and(query_param("id", format!("eq.{}", property_id)))
        .and(query_param("seller_id", format!("eq.{}", seller_id)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let supabase = Supabase::new(&mock_server.uri(), "test-anon-key");
    workflow::delete_property(&supabase, TOKEN, seller_id, property_id)
        .await
        .unwrap();
}

#[tokio::test]
async fn delete_of_an_unowned_property_is_not_found() {
    let mock_server = MockServer::start().await;

    // The ownership-gated fetch matches nothing, whether the property is
    // missing or belongs to someone else.
    Mock::given(method("GET"))
        .and(path("/rest/v1/properties"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let supabase = Supabase::new(&mock_server.uri(), "test-anon-key");
    let result =
        workflow::delete_property(&supabase, TOKEN, Uuid::new_v4(), Uuid::new_v4()).await;

    assert!(matches!(result, Err(Error::NotFound)));
}

#[tokio::test]
async fn update_patches_the_row_and_appends_new_media_after_existing() {
    let mock_server = MockServer::start().await;
    let property_id = Uuid::new_v4();
    let seller_id = Uuid::new_v4();
    let uri = mock_server.uri();

    let existing = vec![media_json(&uri, property_id, "property-images", "a/1-0.jpg", 4)];

    Mock::given(method("GET"))
        .and(path("/rest/v1/properties"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            owned_property_json(property_id, seller_id, existing)
        ])))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/properties"))
        .and(query_param("id", format!("eq.{}", property_id)))
        .and(query_param("seller_id", format!("eq.{}", seller_id)))
        .and(body_partial_json(json!({
            "title": "4 Bedroom Duplex (reduced)",
            "status": "active",
            "features": { "house_types": ["duplex"], "bedroom_category": "4" }
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path_regex(r"^/storage/v1/object/property-images/.+$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "Key": "ok" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    // The kept media row has display_order 4, so the new file lands at 5.
    Mock::given(method("POST"))
        .and(path("/rest/v1/property_media"))
        .and(body_partial_json(json!({ "display_order": 5 })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&mock_server)
        .await;

    let update = PropertyUpdate {
        title: "4 Bedroom Duplex (reduced)".to_string(),
        description: "A lovely place".to_string(),
        price_min: 45_000_000,
        price_max: None,
        state: "Lagos".to_string(),
        lga: Some("Eti-Osa".to_string()),
        city: Some("Lekki".to_string()),
        status: PropertyStatus::Active,
        features: PropertyFeatures::House(HouseFeatures {
            house_types: vec![HouseType::Duplex],
            bedroom_category: Some(proplink::model::BedroomCategory::Four),
            ..Default::default()
        }),
    };

    let supabase = Supabase::new(&mock_server.uri(), "test-anon-key");
    workflow::update_property(
        &supabase,
        TOKEN,
        seller_id,
        property_id,
        update,
        &[],
        vec![image_file("extra.jpg")],
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn update_deletes_requested_media_despite_a_storage_failure() {
    let mock_server = MockServer::start().await;
    let property_id = Uuid::new_v4();
    let seller_id = Uuid::new_v4();
    let uri = mock_server.uri();

    let doomed = media_json(&uri, property_id, "property-images", "a/1-0.jpg", 0);
    let doomed_id: Uuid = serde_json::from_value(doomed["id"].clone()).unwrap();

    Mock::given(method("GET"))
        .and(path("/rest/v1/properties"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            owned_property_json(property_id, seller_id, vec![doomed])
        ])))
        .mount(&mock_server)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/rest/v1/properties"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("DELETE"))
        .and(path("/storage/v1/object/property-images"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend down"))
        .expect(1)
        .mount(&mock_server)
        .await;

    // The row still goes away so the gallery no longer shows the file.
    Mock::given(method("DELETE"))
        .and(path("/rest/v1/property_media"))
        .and(query_param("id", format!("eq.{}", doomed_id)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let update = PropertyUpdate {
        title: "4 Bedroom Duplex".to_string(),
        description: "A lovely place".to_string(),
        price_min: 50_000_000,
        price_max: None,
        state: "Lagos".to_string(),
        lga: None,
        city: None,
        status: PropertyStatus::Active,
        features: PropertyFeatures::House(HouseFeatures {
            house_types: vec![HouseType::Duplex],
            ..Default::default()
        }),
    };

    let supabase = Supabase::new(&mock_server.uri(), "test-anon-key");
    workflow::update_property(
        &supabase,
        TOKEN,
        seller_id,
        property_id,
        update,
        &[doomed_id],
        vec![],
    )
    .await
    .unwrap();
}
