//! Name casing helpers shared by the bridge and the code generator.

/// Convert kebab-case to PascalCase (`ion-button` -> `IonButton`).
pub fn dash_to_pascal_case(s: &str) -> String {
    s.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(c) => c.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Convert camelCase to kebab-case (`autoFocus` -> `auto-focus`).
pub fn camel_to_dash_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 4);
    for c in s.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_to_pascal_case_works() {
        assert_eq!(dash_to_pascal_case("ion-button"), "IonButton");
        assert_eq!(dash_to_pascal_case("my-fancy-input"), "MyFancyInput");
        assert_eq!(dash_to_pascal_case("ionChange"), "IonChange");
    }

    #[test]
    fn camel_to_dash_case_works() {
        assert_eq!(camel_to_dash_case("placeholder"), "placeholder");
        assert_eq!(camel_to_dash_case("autoFocus"), "auto-focus");
        assert_eq!(camel_to_dash_case("routerLink"), "router-link");
    }
}
