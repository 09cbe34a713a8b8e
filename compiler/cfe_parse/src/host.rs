//! Host-semantics plug-in.
//!
//! The parser resolves name-class predicates (typedef name? class name?)
//! through this interface. The default implementation answers `true` only
//! for "undeclared", which keeps the grammar parseable without any
//! semantic analyzer; a real host (a Clang bridge, say) can supply real
//! answers and build host-side types for declarators.

/// Opaque handle to a type built by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TypeHandle(pub u64);

/// Name classification and type construction supplied by an optional host
/// semantic analyzer.
///
/// All methods have defaults, so a host only overrides what it knows.
pub trait HostSemantics {
    fn is_typedef_name(&self, _name: &str) -> bool {
        false
    }

    fn is_class_name(&self, _name: &str) -> bool {
        false
    }

    fn is_enum_name(&self, _name: &str) -> bool {
        false
    }

    fn is_namespace_name(&self, _name: &str) -> bool {
        false
    }

    fn is_namespace_alias(&self, _name: &str) -> bool {
        false
    }

    fn is_template_name(&self, _name: &str) -> bool {
        false
    }

    /// Whether `name` is not declared as anything. The default host knows
    /// no declarations, so everything is undeclared.
    fn is_undeclared_name(&self, _name: &str) -> bool {
        true
    }

    /// Look a name up in a scope (`None` = global scope).
    fn lookup(&self, _scope: Option<TypeHandle>, _name: &str) -> Option<TypeHandle> {
        None
    }

    fn make_array_type(&self, _element: TypeHandle, _len: Option<u64>) -> Option<TypeHandle> {
        None
    }

    fn make_function_type(
        &self,
        _result: TypeHandle,
        _parameters: &[TypeHandle],
        _variadic: bool,
    ) -> Option<TypeHandle> {
        None
    }

    fn make_pointer_type(&self, _pointee: TypeHandle) -> Option<TypeHandle> {
        None
    }

    fn make_lvalue_reference_type(&self, _referee: TypeHandle) -> Option<TypeHandle> {
        None
    }

    fn make_rvalue_reference_type(&self, _referee: TypeHandle) -> Option<TypeHandle> {
        None
    }

    fn make_member_pointer_type(
        &self,
        _class: TypeHandle,
        _pointee: TypeHandle,
    ) -> Option<TypeHandle> {
        None
    }
}

/// The stock host: no declarations, no type construction.
#[derive(Clone, Copy, Debug, Default)]
pub struct DefaultHost;

impl HostSemantics for DefaultHost {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_host_only_knows_undeclared() {
        let host = DefaultHost;
        assert!(host.is_undeclared_name("foo"));
        assert!(!host.is_typedef_name("foo"));
        assert!(!host.is_class_name("foo"));
        assert!(!host.is_template_name("foo"));
        assert!(host.lookup(None, "foo").is_none());
        assert!(host.make_pointer_type(TypeHandle(1)).is_none());
    }
}
