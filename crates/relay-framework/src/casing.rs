use heck::ToLowerCamelCase;

/// Camel-cases an action type, segment by segment.
///
/// Segments are separated by `/` and each is converted on its own, so
/// `NAMESPACE/MY_ACTION` becomes `namespace/myAction`. Input that is already
/// camel-cased is returned unchanged.
pub fn camel_case(action_type: &str) -> String {
    action_type
        .split('/')
        .map(|segment| segment.to_lower_camel_case())
        .collect::<Vec<_>>()
        .join("/")
}
