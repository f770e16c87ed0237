//! Recipes captured from production cabinets
//!
//! Kept as fixtures for host-side tests and for bring-up of new firmware
//! builds before a recipe has been downloaded.

/// Captured 2023-07-01, cycle start 2022-12-29 00:00 UTC.
///
/// Layer A: skip day ×94, then day/night ×36. Layer B: day/night ×186.
/// No appliance periods.
pub const RECIPE_A: [u8; 89] = [
    0xec, 0x56, 0xa0, 0x64, 0x80, 0xd8, 0xac, 0x63, //
    0x02, 0x07, 0x02, 0x01, 0x00, 0x01, 0x5e, 0x02, //
    0x24, 0x02, 0xba, 0x80, 0x51, 0x01, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0xfc, 0x08, 0x3c, 0x00, 0xff, //
    0xff, 0xf8, 0xd9, 0x00, 0x00, 0x3d, 0x27, 0x21, //
    0x0a, 0xfc, 0x08, 0x46, 0x00, 0x83, 0x70, 0x88, //
    0x77, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xd0, //
    0x07, 0x00, 0x00, 0x80, 0x70, 0xf8, 0xd9, 0x00, //
    0x00, 0x3d, 0x27, 0x21, 0x0a, 0xfc, 0x08, 0x46, //
    0x00, 0x83, 0x70, 0x88, 0x77, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0xd0, 0x07, 0x00, 0x00, 0x80, //
    0x70,
];

/// Captured 2023-07-22, cycle start 2023-04-02 00:00 UTC.
///
/// Layer A: day/night ×36. Layer B: skip day ×84, then day/night ×8.
pub const RECIPE_B: [u8; 89] = [
    0xaa, 0x11, 0xbc, 0x64, 0x80, 0xc5, 0x28, 0x64, //
    0x02, 0x07, 0x01, 0x02, 0x00, 0x02, 0x24, 0x01, //
    0x54, 0x02, 0x08, 0xf8, 0xd9, 0x00, 0x00, 0x3d, //
    0x27, 0x21, 0x0a, 0xfc, 0x08, 0x46, 0x00, 0x83, //
    0x70, 0x88, 0x77, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0xd0, 0x07, 0x00, 0x00, 0x80, 0x70, 0x80, //
    0x51, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0xfc, //
    0x08, 0x3c, 0x00, 0xff, 0xff, 0xf8, 0xd9, 0x00, //
    0x00, 0x3d, 0x27, 0x21, 0x0a, 0xfc, 0x08, 0x46, //
    0x00, 0x83, 0x70, 0x88, 0x77, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0xd0, 0x07, 0x00, 0x00, 0x80, //
    0x70,
];

/// Generated day/night recipe with both layers active.
///
/// Each layer: skip day ×6, then (15 h day, 9 h night) ×100.
pub const RECIPE_GENERATED: [u8; 105] = [
    0x86, 0x7b, 0xd6, 0x64, 0x80, 0x3f, 0xcc, 0x64, //
    0x02, 0x07, 0x02, 0x02, 0x00, 0x01, 0x06, 0x02, //
    0x64, 0x01, 0x06, 0x02, 0x64, 0x80, 0x51, 0x01, //
    0x00, 0x00, 0x00, 0x00, 0x00, 0xfc, 0x08, 0x46, //
    0x00, 0xff, 0xff, 0xf0, 0xd2, 0x00, 0x00, 0x01, //
    0x02, 0x03, 0x04, 0xfc, 0x08, 0x46, 0x00, 0x80, //
    0x70, 0x90, 0x7e, 0x00, 0x00, 0x00, 0x00, 0x00, //
    0x00, 0xd0, 0x07, 0x00, 0x00, 0x80, 0x70, 0x80, //
    0x51, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0xfc, //
    0x08, 0x46, 0x00, 0xff, 0xff, 0xf0, 0xd2, 0x00, //
    0x00, 0x01, 0x02, 0x03, 0x04, 0xfc, 0x08, 0x46, //
    0x00, 0x80, 0x70, 0x90, 0x7e, 0x00, 0x00, 0x00, //
    0x00, 0x00, 0x00, 0xd0, 0x07, 0x00, 0x00, 0x80, //
    0x70,
];
