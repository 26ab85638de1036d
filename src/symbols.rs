//! Symbol constructors: single-glyph documents and enclosing wrappers, for
//! ASCII punctuation and the common Unicode typography.

use crate::combinators::text;
use crate::doc::Doc;

/* ASCII */

pub fn lbracket<A>() -> Doc<A> {
    text("[")
}
pub fn rbracket<A>() -> Doc<A> {
    text("]")
}
pub fn lparen<A>() -> Doc<A> {
    text("(")
}
pub fn rparen<A>() -> Doc<A> {
    text(")")
}
pub fn lbrace<A>() -> Doc<A> {
    text("{")
}
pub fn rbrace<A>() -> Doc<A> {
    text("}")
}
pub fn langle<A>() -> Doc<A> {
    text("<")
}
pub fn rangle<A>() -> Doc<A> {
    text(">")
}

pub fn comma<A>() -> Doc<A> {
    text(",")
}
pub fn space<A>() -> Doc<A> {
    text(" ")
}
pub fn squote<A>() -> Doc<A> {
    text("'")
}
pub fn dquote<A>() -> Doc<A> {
    text("\"")
}
pub fn semicolon<A>() -> Doc<A> {
    text(";")
}
pub fn colon<A>() -> Doc<A> {
    text(":")
}
pub fn dot<A>() -> Doc<A> {
    text(".")
}
pub fn slash<A>() -> Doc<A> {
    text("/")
}
pub fn backslash<A>() -> Doc<A> {
    text("\\")
}
pub fn equals<A>() -> Doc<A> {
    text("=")
}
pub fn pipe<A>() -> Doc<A> {
    text("|")
}

/* Unicode */

pub fn b99dquote<A>() -> Doc<A> {
    text("„")
}
pub fn t66dquote<A>() -> Doc<A> {
    text("“")
}
pub fn t99dquote<A>() -> Doc<A> {
    text("”")
}
pub fn b9quote<A>() -> Doc<A> {
    text("‚")
}
pub fn t6quote<A>() -> Doc<A> {
    text("‘")
}
pub fn t9quote<A>() -> Doc<A> {
    text("’")
}
pub fn rd_guillemet<A>() -> Doc<A> {
    text("»")
}
pub fn ld_guillemet<A>() -> Doc<A> {
    text("«")
}
pub fn rs_guillemet<A>() -> Doc<A> {
    text("›")
}
pub fn ls_guillemet<A>() -> Doc<A> {
    text("‹")
}
pub fn bullet<A>() -> Doc<A> {
    text("•")
}
pub fn endash<A>() -> Doc<A> {
    text("–")
}
pub fn euro<A>() -> Doc<A> {
    text("€")
}
pub fn cent<A>() -> Doc<A> {
    text("¢")
}
pub fn yen<A>() -> Doc<A> {
    text("¥")
}
pub fn pound<A>() -> Doc<A> {
    text("£")
}

impl<A> Doc<A> {
    pub fn squotes(&self) -> Doc<A> {
        self.enclose(&squote(), &squote())
    }
    pub fn dquotes(&self) -> Doc<A> {
        self.enclose(&dquote(), &dquote())
    }
    pub fn braces(&self) -> Doc<A> {
        self.enclose(&lbrace(), &rbrace())
    }
    pub fn parens(&self) -> Doc<A> {
        self.enclose(&lparen(), &rparen())
    }
    pub fn brackets(&self) -> Doc<A> {
        self.enclose(&lbracket(), &rbracket())
    }
    pub fn angles(&self) -> Doc<A> {
        self.enclose(&langle(), &rangle())
    }

    /// Enclose in `„`/`“` quotes.
    pub fn d9966quotes(&self) -> Doc<A> {
        self.enclose(&b99dquote(), &t66dquote())
    }
    /// Enclose in `“`/`”` quotes.
    pub fn d6699quotes(&self) -> Doc<A> {
        self.enclose(&t66dquote(), &t99dquote())
    }
    /// Enclose in `‚`/`‘` quotes.
    pub fn s96quotes(&self) -> Doc<A> {
        self.enclose(&b9quote(), &t6quote())
    }
    /// Enclose in `‘`/`’` quotes.
    pub fn s69quotes(&self) -> Doc<A> {
        self.enclose(&t6quote(), &t9quote())
    }
    /// Enclose in `«`/`»` guillemets.
    pub fn d_guillemets_out(&self) -> Doc<A> {
        self.enclose(&ld_guillemet(), &rd_guillemet())
    }
    /// Enclose in `»`/`«` guillemets.
    pub fn d_guillemets_in(&self) -> Doc<A> {
        self.enclose(&rd_guillemet(), &ld_guillemet())
    }
    /// Enclose in `‹`/`›` guillemets.
    pub fn s_guillemets_out(&self) -> Doc<A> {
        self.enclose(&ls_guillemet(), &rs_guillemet())
    }
    /// Enclose in `›`/`‹` guillemets.
    pub fn s_guillemets_in(&self) -> Doc<A> {
        self.enclose(&rs_guillemet(), &ls_guillemet())
    }
}
