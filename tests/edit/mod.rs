mod tests_annotation;
