mod property_whitespace;
mod property_roundtrip;
