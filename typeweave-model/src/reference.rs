//! References to named types.

use crate::context::{CodeGenerationContext, type_alias};
use crate::definition::TypeDefinition;
use crate::error::NamingError;
use crate::types::{Naming, PackageImportSet, Shape, Type};
use proc_macro2::TokenStream;
use typeweave_core::{IdentifierFactory, TypeName, TypeNameSet};

impl Shape for TypeName {
    fn required_imports(&self) -> PackageImportSet {
        [self.package().clone()].into()
    }

    fn references(&self) -> TypeNameSet {
        std::iter::once(self.clone()).collect()
    }

    fn as_type(&self, ctx: &CodeGenerationContext) -> TokenStream {
        ctx.type_reference(self)
    }

    fn as_declarations(
        &self,
        ctx: &CodeGenerationContext,
        name: &TypeName,
        description: Option<&str>,
    ) -> Vec<TokenStream> {
        vec![type_alias(name, description, self.as_type(ctx))]
    }

    fn create_named_definition(
        &self,
        name: &TypeName,
        _ids: &dyn IdentifierFactory,
    ) -> Naming<TypeDefinition> {
        if self == name {
            return Err(NamingError::SelfReference { name: name.clone() });
        }
        Ok((TypeDefinition::new(name.clone(), Type::Name(self.clone())), Vec::new()))
    }

    fn name_internal_definitions(
        &self,
        _hint: &TypeName,
        _ids: &dyn IdentifierFactory,
    ) -> Naming<Type> {
        Ok((Type::Name(self.clone()), Vec::new()))
    }
}
