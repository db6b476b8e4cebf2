use serde::{Deserialize, Serialize};

/// How a parameter is passed to its method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PassMode {
    /// Passed by value
    Value,

    /// Passed by mutable reference
    Ref,

    /// Output parameter
    Out,
}

/// Description of a type as it appears in captured stack metadata
///
/// Descriptors form an acyclic graph through `generic_args`, `declaring_type`
/// and `element_type`, mirroring the host type system. They are immutable
/// once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    /// Namespace the type is declared in (empty for global types)
    pub namespace: String,

    /// Simple type name, possibly still carrying a generic arity suffix
    pub simple_name: String,

    /// Generic arguments in declaration order
    pub generic_args: Vec<TypeDescriptor>,

    /// Lexically enclosing type, for nested types
    pub declaring_type: Option<Box<TypeDescriptor>>,

    /// Element type for arrays, referent type for by-ref types
    pub element_type: Option<Box<TypeDescriptor>>,

    /// Array rank (1 for vectors, 2+ for multi-dimensional arrays)
    pub array_rank: u32,

    /// Whether this is an array type
    pub is_array: bool,

    /// Whether this is a by-ref (managed pointer) type
    pub is_by_ref: bool,

    /// Whether this is the runtime's nullable wrapper over `generic_args[0]`
    pub is_nullable_wrapper: bool,

    /// Whether this is a value tuple, rendered with parentheses
    pub is_value_tuple: bool,

    /// Capability tag: the type carries a compiler-generated marker
    pub compiler_generated: bool,
}

impl TypeDescriptor {
    /// Create a plain, non-generic type descriptor
    pub fn new(namespace: impl Into<String>, simple_name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            simple_name: simple_name.into(),
            generic_args: Vec::new(),
            declaring_type: None,
            element_type: None,
            array_rank: 0,
            is_array: false,
            is_by_ref: false,
            is_nullable_wrapper: false,
            is_value_tuple: false,
            compiler_generated: false,
        }
    }

    /// Create a generic type instantiation
    pub fn generic(
        namespace: impl Into<String>,
        simple_name: impl Into<String>,
        args: Vec<TypeDescriptor>,
    ) -> Self {
        let mut ty = Self::new(namespace, simple_name);
        ty.generic_args = args;
        ty
    }

    /// Create the runtime's nullable wrapper around `inner`
    pub fn nullable(inner: TypeDescriptor) -> Self {
        let mut ty = Self::generic("System", "Nullable`1", vec![inner]);
        ty.is_nullable_wrapper = true;
        ty
    }

    /// Create a value-tuple instantiation over `args`
    pub fn value_tuple(args: Vec<TypeDescriptor>) -> Self {
        let arity = args.len();
        let mut ty = Self::generic("System", format!("ValueTuple`{arity}"), args);
        ty.is_value_tuple = true;
        ty
    }

    /// Create an array type with the given element type and rank
    pub fn array(element: TypeDescriptor, rank: u32) -> Self {
        let mut ty = Self::new(element.namespace.clone(), element.simple_name.clone());
        ty.element_type = Some(Box::new(element));
        ty.array_rank = rank.max(1);
        ty.is_array = true;
        ty
    }

    /// Create a by-ref type around `referent`
    pub fn by_ref(referent: TypeDescriptor) -> Self {
        let mut ty = Self::new(referent.namespace.clone(), referent.simple_name.clone());
        ty.element_type = Some(Box::new(referent));
        ty.is_by_ref = true;
        ty
    }

    /// Create a type nested inside `declaring`
    pub fn nested(declaring: TypeDescriptor, simple_name: impl Into<String>) -> Self {
        let mut ty = Self::new(declaring.namespace.clone(), simple_name);
        ty.declaring_type = Some(Box::new(declaring));
        ty
    }

    /// Tag this type as compiler-generated
    pub fn generated(mut self) -> Self {
        self.compiler_generated = true;
        self
    }

    /// Whether this type is nested inside another type
    pub fn is_nested(&self) -> bool {
        self.declaring_type.is_some()
    }

    /// Namespace of the outermost lexical owner of this type
    ///
    /// For non-nested types this is just `namespace`; nested types inherit
    /// the namespace of the type chain they are declared in.
    pub fn root_namespace(&self) -> &str {
        match &self.declaring_type {
            Some(owner) => owner.root_namespace(),
            None => &self.namespace,
        }
    }

    /// Stable identity key for this type
    ///
    /// Nested types are keyed through their lexical owner chain with a `+`
    /// separator, matching the host runtime's full-name convention, so the
    /// key survives formatting-level rewrites of the simple name.
    pub fn full_name(&self) -> String {
        match &self.declaring_type {
            Some(owner) => format!("{}+{}", owner.full_name(), self.simple_name),
            None if self.namespace.is_empty() => self.simple_name.clone(),
            None => format!("{}.{}", self.namespace, self.simple_name),
        }
    }
}

/// One formal parameter of a method
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name (may be empty for synthesized parameters)
    pub name: String,

    /// Parameter type
    pub ty: TypeDescriptor,

    /// How the parameter is passed
    pub pass_mode: PassMode,
}

impl Parameter {
    /// Create a by-value parameter
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self::with_mode(name, ty, PassMode::Value)
    }

    /// Create a parameter with an explicit pass mode
    pub fn with_mode(name: impl Into<String>, ty: TypeDescriptor, pass_mode: PassMode) -> Self {
        Self {
            name: name.into(),
            ty,
            pass_mode,
        }
    }
}

/// Description of a method as it appears in captured stack metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Declaring type, absent for native/unmanaged frames
    pub declaring_type: Option<TypeDescriptor>,

    /// Method name, possibly compiler-mangled until formatting runs
    pub name: String,

    /// Whether the method has generic parameters
    pub is_generic: bool,

    /// Generic arguments in declaration order
    pub generic_args: Vec<TypeDescriptor>,

    /// Formal parameters in declaration order
    pub parameters: Vec<Parameter>,

    /// Capability tag: the member carries a compiler-generated marker
    pub compiler_generated: bool,
}

impl MethodDescriptor {
    /// Create a method descriptor with no parameters
    pub fn new(declaring_type: Option<TypeDescriptor>, name: impl Into<String>) -> Self {
        Self {
            declaring_type,
            name: name.into(),
            is_generic: false,
            generic_args: Vec::new(),
            parameters: Vec::new(),
            compiler_generated: false,
        }
    }

    /// Attach formal parameters
    pub fn with_parameters(mut self, parameters: Vec<Parameter>) -> Self {
        self.parameters = parameters;
        self
    }

    /// Attach generic arguments, marking the method generic
    pub fn with_generic_args(mut self, args: Vec<TypeDescriptor>) -> Self {
        self.is_generic = true;
        self.generic_args = args;
        self
    }

    /// Tag this member as compiler-generated
    pub fn generated(mut self) -> Self {
        self.compiler_generated = true;
        self
    }
}

/// One raw captured stack entry, frozen at capture time
///
/// `method` is `None` for frames the host could not resolve (e.g. frames
/// from external images); such frames are dropped during normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawFrame {
    /// Method descriptor, if the frame could be resolved
    pub method: Option<MethodDescriptor>,

    /// Source file path, if debug information is available
    pub file: Option<String>,

    /// Source line number (0 when unknown)
    pub line: u32,

    /// Source column number (0 when unknown)
    pub column: u32,
}

impl RawFrame {
    /// Create a resolved frame without source location
    pub fn new(method: MethodDescriptor) -> Self {
        Self {
            method: Some(method),
            file: None,
            line: 0,
            column: 0,
        }
    }

    /// Create an unresolvable frame
    pub fn unresolved() -> Self {
        Self {
            method: None,
            file: None,
            line: 0,
            column: 0,
        }
    }

    /// Attach a source location
    pub fn with_location(mut self, file: impl Into<String>, line: u32, column: u32) -> Self {
        self.file = Some(file.into());
        self.line = line;
        self.column = column;
        self
    }
}

/// One demystified stack entry
///
/// Immutable once constructed; owned exclusively by the render call that
/// created it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedFrame {
    /// Original or remapped method descriptor
    pub method: MethodDescriptor,

    /// Source file path, if available
    pub file: Option<String>,

    /// Source line number (0 when unknown)
    pub line: u32,

    /// Source column number (0 when unknown)
    pub column: u32,
}

/// An exception value together with its captured raw call stack
///
/// `children` holds exactly one entry for a simple inner exception, or any
/// number of entries for an aggregate's inner-exception set; rendering is
/// uniform over both shapes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedException {
    /// Full type name of the exception
    pub type_name: String,

    /// Exception message, if any
    pub message: Option<String>,

    /// Raw captured stack, newest frame first
    pub frames: Vec<RawFrame>,

    /// Causal children: one for an inner exception, many for an aggregate
    pub children: Vec<CapturedException>,
}

impl CapturedException {
    /// Create an exception with no message, frames or children
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            message: None,
            frames: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Attach a message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attach the raw captured stack
    pub fn with_frames(mut self, frames: Vec<RawFrame>) -> Self {
        self.frames = frames;
        self
    }

    /// Append one causal child
    pub fn with_inner(mut self, inner: CapturedException) -> Self {
        self.children.push(inner);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_plain() {
        let ty = TypeDescriptor::new("MyApp.Services", "OrderService");
        assert_eq!(ty.full_name(), "MyApp.Services.OrderService");
    }

    #[test]
    fn test_full_name_global_namespace() {
        let ty = TypeDescriptor::new("", "Program");
        assert_eq!(ty.full_name(), "Program");
    }

    #[test]
    fn test_full_name_nested_chain() {
        let outer = TypeDescriptor::new("MyApp", "Outer");
        let inner = TypeDescriptor::nested(outer, "Inner");
        let leaf = TypeDescriptor::nested(inner, "<Bar>d__3");
        assert_eq!(leaf.full_name(), "MyApp.Outer+Inner+<Bar>d__3");
    }

    #[test]
    fn test_root_namespace_of_nested_type() {
        let outer = TypeDescriptor::new("System.Threading.Tasks", "Task");
        let nested = TypeDescriptor::nested(outer, "DelayPromise");
        assert_eq!(nested.root_namespace(), "System.Threading.Tasks");
    }

    #[test]
    fn test_generated_tag() {
        let ty = TypeDescriptor::new("MyApp", "<Bar>d__3").generated();
        assert!(ty.compiler_generated);
        let method = MethodDescriptor::new(Some(ty), "MoveNext").generated();
        assert!(method.compiler_generated);
    }

    #[test]
    fn test_exception_children_shapes() {
        let simple = CapturedException::new("System.InvalidOperationException")
            .with_inner(CapturedException::new("System.IO.IOException"));
        assert_eq!(simple.children.len(), 1);

        let aggregate = CapturedException::new("System.AggregateException")
            .with_inner(CapturedException::new("A"))
            .with_inner(CapturedException::new("B"));
        assert_eq!(aggregate.children.len(), 2);
    }
}
