mod tests_roundtrip;
