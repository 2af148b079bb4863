//! Test fixtures: store reference data and canned images

use serde_json::{json, Value};

/// Store directory file in the production layout (area_code, store_name, store_id).
pub const STORE_MASTER_CSV: &str = "\
AreaCode,StoreName,StoreID
7100001,RP Mart,RP00001
7100002,Kirana Corner,RP00002
7100003,Daily Needs,RP00003
";

/// A test image served by the stub fetcher.
#[derive(Debug, Clone, Copy)]
pub struct ImageFixture {
    pub url: &'static str,
    pub width: u32,
    pub height: u32,
}

pub const IMAGE_FIXTURES: &[ImageFixture] = &[
    ImageFixture {
        url: "http://images.test/shelf-front.png",
        width: 100,
        height: 50,
    },
    ImageFixture {
        url: "http://images.test/shelf-back.jpg",
        width: 640,
        height: 480,
    },
    ImageFixture {
        url: "http://images.test/counter.webp",
        width: 1,
        height: 1,
    },
];

pub const MISSING_IMAGE_URL: &str = "http://images.test/missing.png";

/// Build a submission body whose `count` matches its visits.
pub fn submission(visits: &[(&str, &[&str])]) -> Value {
    let visits: Vec<Value> = visits
        .iter()
        .map(|(store_id, urls)| {
            json!({
                "store_id": store_id,
                "image_url": urls,
                "visit_time": "2024-03-01T09:30:00Z",
            })
        })
        .collect();
    json!({ "count": visits.len(), "visits": visits })
}
