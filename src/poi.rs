//! Place-type tag → Thai category label.
//!
//! The priority table is ordered most specific first, so a place tagged
//! both `hospital` and `food` reports as a hospital no matter how the tags
//! arrive.

/// Raw place type → Thai label, most specific first.
pub const CATEGORY_PRIORITY: &[(&str, &str)] = &[
    ("hospital", "โรงพยาบาล"),
    ("university", "มหาวิทยาลัย"),
    ("school", "โรงเรียน"),
    ("shopping_mall", "ห้างสรรพสินค้า"),
    ("department_store", "ห้างสรรพสินค้า"),
    ("supermarket", "ซูเปอร์มาร์เก็ต"),
    ("grocery_or_supermarket", "ซูเปอร์มาร์เก็ต"),
    ("hardware_store", "ร้านฮาร์ดแวร์"),
    ("home_goods_store", "ร้านของตกแต่งบ้าน"),
    ("furniture_store", "ร้านเฟอร์นิเจอร์"),
    ("gas_station", "ปั๊มน้ำมัน"),
    ("bank", "ธนาคาร"),
    ("atm", "ตู้ ATM"),
    ("pharmacy", "ร้านขายยา"),
    ("place_of_worship", "วัด/ศาสนสถาน"),
    ("market", "ตลาด"),
    ("park", "สวนสาธารณะ"),
    ("lodging", "ที่พัก/โรงแรม"),
    ("police", "สถานีตำรวจ"),
    ("restaurant", "ร้านอาหาร"),
    ("cafe", "คาเฟ่"),
    ("bakery", "เบเกอรี่"),
    ("bar", "บาร์"),
    ("food", "ร้านอาหาร"),
    ("convenience_store", "ร้านสะดวกซื้อ"),
    ("car_repair", "อู่ซ่อมรถ"),
    ("car_wash", "ร้านล้างรถ"),
    ("gym", "ฟิตเนส"),
    ("movie_theater", "โรงภาพยนตร์"),
    ("electronics_store", "ร้านอิเล็กทรอนิกส์"),
    ("clothing_store", "ร้านเสื้อผ้า"),
    ("beauty_salon", "ร้านเสริมสวย"),
    ("laundry", "ร้านซักรีด"),
];

/// Tags too generic to say anything about a place.
pub const SKIP_TAGS: &[&str] = &[
    "point_of_interest",
    "establishment",
    "premise",
    "street_address",
    "political",
    "locality",
    "sublocality",
    "route",
    "intersection",
    "store",
];

pub fn is_skipped(tag: &str) -> bool {
    SKIP_TAGS.contains(&tag)
}

/// Tags left after dropping everything in [`SKIP_TAGS`], in input order.
pub fn usable_tags<S: AsRef<str>>(tags: &[S]) -> Vec<&str> {
    tags.iter()
        .map(AsRef::as_ref)
        .filter(|tag| !is_skipped(tag))
        .collect()
}

fn label_for(tag: &str) -> Option<&'static str> {
    CATEGORY_PRIORITY
        .iter()
        .find(|(raw, _)| *raw == tag)
        .map(|(_, label)| *label)
}

/// Best-fit Thai label for a place's tags, or `""` when none is known.
///
/// First pass walks the priority table and takes the first priority tag
/// present anywhere in `tags`. Second pass walks `tags` in order and takes
/// the first non-skipped tag that has a label.
pub fn primary_label<S: AsRef<str>>(tags: &[S]) -> &'static str {
    let has = |wanted: &str| tags.iter().any(|t| t.as_ref() == wanted);

    if let Some(&(_, label)) = CATEGORY_PRIORITY.iter().find(|&&(raw, _)| has(raw)) {
        return label;
    }

    tags.iter()
        .map(AsRef::as_ref)
        .filter(|tag| !is_skipped(tag))
        .find_map(label_for)
        .unwrap_or("")
}
