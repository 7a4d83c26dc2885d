//! A small standard hierarchy built on top of [`Universe`].
//!
//! ```text
//! scala.Iterable[+A]
//!   └─ scala.Seq[+A]
//!        └─ scala.List[+A]  (with scala.Product)
//! scala.Option[+A] ─ scala.Some[+A], object scala.None
//! scala.Map[K, +V] <: scala.Iterable[scala.Tuple2[K, V]]
//! scala.Function1[-A, +B], scala.Either[+L, +R], scala.Functor[F[_]]
//! object scala.Predef { type Str; type Id[A]; type StrMap[+V] }
//! ```

use crate::universe::{SymbolId, Ty, TypeData, Universe};
use lighttag_model::Variance;

pub struct Prelude {
    pub universe: Universe,
    pub scala: SymbolId,
    pub int: SymbolId,
    pub string: SymbolId,
    pub product: SymbolId,
    pub iterable: SymbolId,
    pub seq: SymbolId,
    pub list: SymbolId,
    pub option: SymbolId,
    pub some: SymbolId,
    pub none: SymbolId,
    pub tuple2: SymbolId,
    pub map: SymbolId,
    pub function1: SymbolId,
    pub either: SymbolId,
    pub functor: SymbolId,
    pub predef: SymbolId,
    pub str_alias: SymbolId,
    pub id_alias: SymbolId,
    pub str_map_alias: SymbolId,
}

impl Default for Prelude {
    fn default() -> Self {
        Self::new()
    }
}

impl Prelude {
    pub fn new() -> Self {
        use Variance::{Contravariant, Covariant, Invariant};

        let mut u = Universe::new();
        let scala = u.package(None, "scala");

        let int = u.class(scala, "Int");
        let string = u.class(scala, "String");
        let product = u.class(scala, "Product");

        let iterable = u.class(scala, "Iterable");
        u.type_param(iterable, "A", Covariant);

        let seq = u.class(scala, "Seq");
        let seq_a = u.type_param(seq, "A", Covariant);
        let parents = vec![u.applied(iterable, vec![u.type_ref(seq_a)])];
        u.set_parents(seq, parents);

        let list = u.class(scala, "List");
        let list_a = u.type_param(list, "A", Covariant);
        let parents = vec![
            u.applied(seq, vec![u.type_ref(list_a)]),
            u.type_ref(product),
        ];
        u.set_parents(list, parents);

        let option = u.class(scala, "Option");
        u.type_param(option, "A", Covariant);
        let parents = vec![u.type_ref(product)];
        u.set_parents(option, parents);

        let some = u.class(scala, "Some");
        let some_a = u.type_param(some, "A", Covariant);
        let parents = vec![u.applied(option, vec![u.type_ref(some_a)])];
        u.set_parents(some, parents);

        let none = u.module(scala, "None");
        let parents = vec![u.applied(option, vec![u.nothing_type()])];
        u.set_parents(none, parents);

        let tuple2 = u.class(scala, "Tuple2");
        u.type_param(tuple2, "T1", Covariant);
        u.type_param(tuple2, "T2", Covariant);
        let parents = vec![u.type_ref(product)];
        u.set_parents(tuple2, parents);

        let map = u.class(scala, "Map");
        let map_k = u.type_param(map, "K", Invariant);
        let map_v = u.type_param(map, "V", Covariant);
        let entry = u.applied(tuple2, vec![u.type_ref(map_k), u.type_ref(map_v)]);
        let parents = vec![u.applied(iterable, vec![entry])];
        u.set_parents(map, parents);

        let function1 = u.class(scala, "Function1");
        u.type_param(function1, "T1", Contravariant);
        u.type_param(function1, "R", Covariant);

        let either = u.class(scala, "Either");
        u.type_param(either, "L", Covariant);
        u.type_param(either, "R", Covariant);
        let parents = vec![u.type_ref(product)];
        u.set_parents(either, parents);

        let functor = u.class(scala, "Functor");
        let functor_f = u.type_param(functor, "F", Invariant);
        u.type_param(functor_f, "_", Invariant);

        let predef = u.module(scala, "Predef");

        let str_alias = u.alias(predef, "Str");
        let body = u.type_ref(string);
        u.set_body(str_alias, body);

        let id_alias = u.alias(predef, "Id");
        let id_a = u.type_param(id_alias, "A", Invariant);
        let body = u.type_ref(id_a);
        u.set_body(id_alias, body);

        let str_map_alias = u.alias(predef, "StrMap");
        let str_map_v = u.type_param(str_map_alias, "V", Covariant);
        let body = u.applied(map, vec![u.type_ref(string), u.type_ref(str_map_v)]);
        u.set_body(str_map_alias, body);

        Prelude {
            universe: u,
            scala,
            int,
            string,
            product,
            iterable,
            seq,
            list,
            option,
            some,
            none,
            tuple2,
            map,
            function1,
            either,
            functor,
            predef,
            str_alias,
            id_alias,
            str_map_alias,
        }
    }

    pub fn int_type(&self) -> Ty {
        self.universe.type_ref(self.int)
    }

    pub fn string_type(&self) -> Ty {
        self.universe.type_ref(self.string)
    }

    pub fn list_of(&self, element: Ty) -> Ty {
        self.universe.applied(self.list, vec![element])
    }

    pub fn option_of(&self, element: Ty) -> Ty {
        self.universe.applied(self.option, vec![element])
    }

    pub fn map_of(&self, key: Ty, value: Ty) -> Ty {
        self.universe.applied(self.map, vec![key, value])
    }

    pub fn either_of(&self, left: Ty, right: Ty) -> Ty {
        self.universe.applied(self.either, vec![left, right])
    }

    /// Named sample types, used by the CLI and by tests.
    pub fn samples(&self) -> Vec<(&'static str, Ty)> {
        let u = &self.universe;
        vec![
            ("Int", self.int_type()),
            ("String", self.string_type()),
            ("List", u.type_ref(self.list)),
            ("List[Int]", self.list_of(self.int_type())),
            ("Option[String]", self.option_of(self.string_type())),
            ("Some[Int]", u.applied(self.some, vec![self.int_type()])),
            ("None.type", u.single(self.none)),
            ("Map[String, Int]", self.map_of(self.string_type(), self.int_type())),
            (
                "Function1[Int, String]",
                u.applied(self.function1, vec![self.int_type(), self.string_type()]),
            ),
            ("Either[String, Int]", self.either_of(self.string_type(), self.int_type())),
            ("Functor[List]", u.applied(self.functor, vec![u.type_ref(self.list)])),
            ("Predef.Str", u.type_ref(self.str_alias)),
            ("Predef.StrMap", u.type_ref(self.str_map_alias)),
            (
                "Predef.StrMap[Int]",
                u.applied(self.str_map_alias, vec![self.int_type()]),
            ),
            (
                "Iterable[Int] with Product",
                TypeData::refined(
                    vec![
                        u.applied(self.iterable, vec![self.int_type()]),
                        u.type_ref(self.product),
                    ],
                    Vec::new(),
                ),
            ),
            ("\"42\"", TypeData::constant("42")),
        ]
    }

    pub fn sample(&self, name: &str) -> Option<Ty> {
        self.samples()
            .into_iter()
            .find(|(sample, _)| *sample == name)
            .map(|(_, ty)| ty)
    }
}
